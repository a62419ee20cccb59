// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::{Forwarder, SharedSettings};
use reqwest::Client;
use std::collections::BTreeMap;
use url::Url;

/// Sends submitted forms to the configured third party service
///
/// Forwarding is best effort, failures are logged and never returned to the caller.
#[derive(Debug, Clone)]
pub struct SubmissionForwarder {
    settings: SharedSettings,
    client: Client,
}

impl SubmissionForwarder {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    /// Forward the submitted `payload`
    ///
    /// Picks up the forwarder settings on every call, so a reload takes effect with the next submission.
    #[tracing::instrument(skip_all, fields(keys = payload.len()))]
    pub async fn forward(&self, payload: &BTreeMap<String, String>) {
        let settings = self.settings.load().forwarder.clone();

        match &settings.endpoint {
            Some(endpoint) => self.post(endpoint, &settings, payload).await,
            None => Self::simulate(&settings, payload).await,
        }
    }

    async fn post(&self, endpoint: &Url, settings: &Forwarder, payload: &BTreeMap<String, String>) {
        let result = self
            .client
            .post(endpoint.clone())
            .timeout(settings.timeout)
            .json(payload)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(response) => log::info!(
                "Forwarded submission to {}, status {}",
                endpoint,
                response.status()
            ),
            Err(e) => log::warn!("Failed to forward submission to {}, {}", endpoint, e),
        }
    }

    async fn simulate(settings: &Forwarder, payload: &BTreeMap<String, String>) {
        log::info!("Sending data to third-party service: {:?}", payload);

        tokio::time::sleep(settings.simulated_latency).await;

        log::info!("Data sent successfully");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use arc_swap::ArcSwap;
    use config::{Config, File, FileFormat};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn shared_settings(forwarder: &str) -> SharedSettings {
        let toml = format!("[database]\nurl = \"postgres://localhost/formgate\"\n{forwarder}");

        let settings: Settings = Config::builder()
            .add_source(File::from_str(&toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        Arc::new(ArcSwap::from_pointee(settings))
    }

    fn payload() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("sex".to_owned(), "Male".to_owned()),
            ("bogusField".to_owned(), "x".to_owned()),
        ])
    }

    #[actix_rt::test]
    async fn log_only_waits_for_the_simulated_latency() {
        let forwarder =
            SubmissionForwarder::new(shared_settings("[forwarder]\nsimulated_latency = 50"));

        let start = Instant::now();
        forwarder.forward(&payload()).await;

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[actix_rt::test]
    async fn unreachable_endpoint_is_swallowed() {
        // nothing listens on the discard port
        let forwarder = SubmissionForwarder::new(shared_settings(
            "[forwarder]\nendpoint = \"http://127.0.0.1:9/submissions\"\ntimeout = 1",
        ));

        forwarder.forward(&payload()).await;
    }

    #[actix_rt::test]
    async fn reloaded_settings_are_used() {
        let settings = shared_settings("[forwarder]\nsimulated_latency = 5000");
        let forwarder = SubmissionForwarder::new(settings.clone());

        let mut reloaded = (*settings.load_full()).clone();
        reloaded.forwarder.simulated_latency = Duration::ZERO;
        settings.store(Arc::new(reloaded));

        let start = Instant::now();
        forwarder.forward(&payload()).await;

        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
