// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Modules to HTTP APIs
use actix_web::{web, Scope};

pub mod response;
pub mod users;

/// All endpoints, mounted under `/api`
pub fn scope() -> Scope {
    web::scope("/api")
        .service(users::get_missing_fields)
        .service(users::submit_form)
}
