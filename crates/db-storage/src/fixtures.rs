// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Sample data for demonstrations and tests
//!
//! Loading is idempotent: each table is only seeded while it is empty.
use crate::fields::ProfileField;
use crate::required_fields::NewRequiredField;
use crate::schema::{required_fields, users};
use crate::users::NewUser;
use database::{DatabaseError, DbConnection, Result};
use diesel::{Connection, QueryDsl, RunQueryDsl};

/// `(first_name, last_name, birth_date, birth_place, sex, current_address)`
type SampleUser = (
    &'static str,
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
);

const SAMPLE_USERS: [SampleUser; 10] = [
    ("Nicolas", "Donati", None, None, None, None),
    (
        "Nick",
        "Johnson",
        Some("1990-07-22"),
        Some("Los Angeles"),
        Some("Male"),
        None,
    ),
    (
        "Nico",
        "Williams",
        Some("1988-11-30"),
        Some("Chicago"),
        Some("Male"),
        Some("456 Oak Ave, Chicago"),
    ),
    (
        "Nikolas",
        "Brown",
        Some("1992-05-18"),
        None,
        Some("Male"),
        Some("789 Pine Rd, Houston"),
    ),
    (
        "Cole",
        "Davis",
        Some("1987-09-03"),
        Some("Miami"),
        Some("Male"),
        None,
    ),
    (
        "Nicholas",
        "Miller",
        Some("1993-01-25"),
        Some("Seattle"),
        None,
        Some("321 Cedar Ln, Seattle"),
    ),
    (
        "Nicky",
        "Wilson",
        Some("1991-06-11"),
        None,
        Some("Male"),
        Some("654 Birch Dr, Boston"),
    ),
    (
        "Nicolás",
        "Garcia",
        Some("1986-12-07"),
        Some("San Francisco"),
        Some("Male"),
        Some("987 Elm St, San Francisco"),
    ),
    (
        "Nik",
        "Martinez",
        Some("1994-04-20"),
        Some("Denver"),
        Some("Male"),
        None,
    ),
    (
        "Nikolai",
        "Anderson",
        Some("1989-08-14"),
        Some("Phoenix"),
        Some("Male"),
        Some("147 Maple Ave, Phoenix"),
    ),
];

/// The sample users in insertion order
pub fn sample_users() -> Vec<NewUser> {
    SAMPLE_USERS
        .iter()
        .map(
            |&(first_name, last_name, birth_date, birth_place, sex, current_address)| NewUser {
                first_name: Some(first_name.into()),
                last_name: Some(last_name.into()),
                birth_date: birth_date.map(Into::into),
                birth_place: birth_place.map(Into::into),
                sex: sex.map(Into::into),
                current_address: current_address.map(Into::into),
            },
        )
        .collect()
}

/// The sample required field configuration: every profile field is required
pub fn sample_required_fields() -> Vec<NewRequiredField> {
    ProfileField::ALL.into_iter().map(Into::into).collect()
}

/// Number of rows inserted by [`load_fixtures`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixtureReport {
    pub users: usize,
    pub required_fields: usize,
}

/// Seed the `users` and `required_fields` tables with the sample data
///
/// A table which already contains rows is left untouched, so calling this repeatedly is safe.
#[tracing::instrument(err, skip_all)]
pub fn load_fixtures(conn: &mut DbConnection) -> Result<FixtureReport> {
    conn.transaction::<_, DatabaseError, _>(|conn| {
        let mut report = FixtureReport::default();

        let user_count: i64 = users::table.count().get_result(conn)?;
        if user_count == 0 {
            report.users = NewUser::insert_many(conn, sample_users())?.len();
        } else {
            log::debug!("users table contains {user_count} rows, skipping sample users");
        }

        let field_count: i64 = required_fields::table.count().get_result(conn)?;
        if field_count == 0 {
            report.required_fields =
                NewRequiredField::insert_many(conn, sample_required_fields())?.len();
        } else {
            log::debug!(
                "required_fields table contains {field_count} rows, skipping sample configuration"
            );
        }

        Ok(report)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ten_named_sample_users() {
        let users = sample_users();

        assert_eq!(users.len(), 10);
        assert!(users
            .iter()
            .all(|user| user.first_name.is_some() && user.last_name.is_some()));
        assert_eq!(users[0].first_name.as_deref(), Some("Nicolas"));
        assert!(users[0].birth_date.is_none() && users[0].current_address.is_none());
    }

    #[test]
    fn every_profile_field_is_required() {
        let names: Vec<_> = sample_required_fields()
            .into_iter()
            .map(|field| field.field_name)
            .collect();

        assert_eq!(
            names,
            ["firstName", "lastName", "birthDate", "birthPlace", "sex", "currentAddress"]
        );
    }
}
