// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Contains the database ORM, the migrations and the sample fixtures of formgate.
//! Builds upon formgate-database
//!
//! Every table has a module which contains the diesel structs and the queries for it,
//! e.g. [`users::User::get`] or [`required_fields::RequiredField::get_all`].

#[macro_use]
mod macros;
mod schema;

pub mod fields;
pub mod fixtures;
pub mod migrations;
pub mod required_fields;
pub mod users;
