// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! User profile endpoints
//!
//! Reports the required fields a user has not filled in yet and accepts form submissions
//! which fill them in.
use super::response::{ApiError, SubmissionError};
use crate::services::{self, MissingFields, ProfileStore, Submission, SubmissionForwarder};
use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, HttpResponse};
use db_storage::users::UserId;

const SUBMISSION_SUCCESS: &str = "Data updated successfully and sent to third-party service";

/// API Endpoint *GET /users/{user_id}/missing-fields*
///
/// Returns the names of all required fields which are unset for the user.
#[get("/users/{user_id}/missing-fields")]
pub async fn get_missing_fields(
    store: Data<dyn ProfileStore>,
    user_id: Path<UserId>,
) -> Result<Json<MissingFields>, ApiError> {
    let user_id = user_id.into_inner();

    let missing = crate::block(move || services::missing_fields(&**store, user_id)).await??;

    Ok(Json(missing))
}

/// API Endpoint *POST /users/{user_id}/submit-form*
///
/// Stores the updatable fields of the submitted form and forwards the complete
/// submission to the third party service.
#[post("/users/{user_id}/submit-form")]
pub async fn submit_form(
    store: Data<dyn ProfileStore>,
    forwarder: Data<SubmissionForwarder>,
    user_id: Path<UserId>,
    submission: Json<Submission>,
) -> Result<HttpResponse, SubmissionError> {
    let user_id = user_id.into_inner();
    let submission = submission.into_inner();

    log::debug!("Received form of user {}: {:?}", user_id, submission);

    let update = submission.clone();
    crate::block(move || services::update_fields(&**store, user_id, &update)).await??;

    forwarder.forward(&submission).await;

    log::info!("Processed form submission of user {}", user_id);

    Ok(HttpResponse::Ok()
        .content_type(mime::TEXT_PLAIN_UTF_8)
        .body(SUBMISSION_SUCCESS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::response::json_error_handler;
    use crate::services::MemoryStore;
    use crate::settings::Settings;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use arc_swap::ArcSwap;
    use config::{Config, File, FileFormat};
    use serde_json::{json, Value};
    use std::sync::Arc;

    const NAME_ONLY: [Option<&str>; 6] = [Some("Nicolas"), Some("Donati"), None, None, None, None];

    fn store() -> Arc<MemoryStore> {
        let store = MemoryStore::default();
        store.add_user(&NAME_ONLY);

        for name in [
            "firstName",
            "lastName",
            "birthDate",
            "birthPlace",
            "sex",
            "currentAddress",
        ] {
            store.add_required_field(name);
        }

        Arc::new(store)
    }

    fn forwarder() -> SubmissionForwarder {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[database]\nurl = \"postgres://localhost/formgate\"\n\n[forwarder]\nsimulated_latency = 0",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        SubmissionForwarder::new(Arc::new(ArcSwap::from_pointee(settings)))
    }

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(Data::<dyn ProfileStore>::from(
                        $store.clone() as Arc<dyn ProfileStore>
                    ))
                    .app_data(Data::new(forwarder()))
                    .service(crate::api::scope()),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn missing_fields_of_a_name_only_user() {
        let store = store();
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/users/1/missing-fields")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "userId": 1,
                "missingFields": ["birthDate", "birthPlace", "sex", "currentAddress"]
            })
        );
    }

    #[actix_rt::test]
    async fn missing_fields_of_unknown_user() {
        let store = store();
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/users/42/missing-fields")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({"code": "not_found", "message": "User not found"})
        );
    }

    #[actix_rt::test]
    async fn non_numeric_user_id_is_not_found() {
        let store = store();
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/users/abc/missing-fields")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn submission_fills_missing_fields() {
        let store = store();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/users/1/submit-form")
            .set_json(json!({"sex": "Male", "bogusField": "x", "firstName": "Changed"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(test::read_body(resp).await, SUBMISSION_SUCCESS);

        let req = test::TestRequest::get()
            .uri("/api/users/1/missing-fields")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["missingFields"],
            json!(["birthDate", "birthPlace", "currentAddress"])
        );
        assert_eq!(
            store.user(UserId::from(1)).unwrap().first_name.as_deref(),
            Some("Nicolas")
        );
    }

    #[actix_rt::test]
    async fn submission_for_unknown_user() {
        let store = store();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/users/42/submit-form")
            .set_json(json!({"sex": "Male"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            test::read_body(resp).await,
            "Error occurred: User not found"
        );
    }

    #[actix_rt::test]
    async fn submission_with_non_string_values_is_rejected() {
        let store = store();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/users/1/submit-form")
            .set_json(json!({"sex": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "invalid_json");
        assert_eq!(store.user(UserId::from(1)).unwrap().sex, None);
    }

    #[actix_rt::test]
    async fn empty_submission_succeeds() {
        let store = store();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/users/1/submit-form")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
