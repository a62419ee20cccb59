// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::Settings;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use database::Db;
use db_storage::fixtures;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "formgate", version)]
pub struct Args {
    /// Specify path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    cmd: Option<SubCommand>,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommand {
    /// Migrate the db. This is done automatically during start of the controller,
    /// but can be done without starting the controller using this command.
    MigrateDb,
    /// Migrate the db and load the sample users and required fields.
    /// Tables which already contain rows are left untouched.
    LoadFixtures,
}

impl Args {
    /// Returns true if we want to startup the controller after we finished the cli part
    pub fn controller_should_start(&self) -> bool {
        self.cmd.is_none()
    }
}

/// Parses the CLI-Arguments into [`Args`]
///
/// Also runs (optional) cli commands if necessary
pub async fn parse_args() -> Result<Args> {
    let args = Args::parse();

    if let Some(sub_command) = args.cmd.clone() {
        let settings = Settings::load(&args.config)?;

        db_storage::migrations::migrate_from_url(&settings.database.url)
            .await
            .context("Failed to migrate database")?;

        match sub_command {
            SubCommand::MigrateDb => {
                println!("Database is up to date");
            }
            SubCommand::LoadFixtures => load_fixtures(&settings).await?,
        }
    }

    Ok(args)
}

async fn load_fixtures(settings: &Settings) -> Result<()> {
    let db = Db::connect_url(&settings.database.url, 1, None)
        .context("Failed to connect to database")?;

    let report = crate::block(move || {
        let mut conn = db.get_conn()?;

        fixtures::load_fixtures(&mut conn)
    })
    .await??;

    println!(
        "Inserted {} users and {} required fields",
        report.users, report.required_fields
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_subcommand() {
        let args = Args::parse_from(["formgate", "-c", "extra/example.toml"]);

        assert!(args.controller_should_start());
        assert_eq!(args.config, PathBuf::from("extra/example.toml"));
    }

    #[test]
    fn subcommands_do_not_start_the_controller() {
        for cmd in ["migrate-db", "load-fixtures"] {
            let args = Args::parse_from(["formgate", cmd]);

            assert!(!args.controller_should_start());
            assert_eq!(args.config, PathBuf::from("config.toml"));
        }
    }
}
