// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! The global list of profile fields every user is expected to fill in
use super::fields::ProfileField;
use super::schema::required_fields;
use database::{DbConnection, Result};
use diesel::{ExpressionMethods, Identifiable, Insertable, QueryDsl, Queryable, RunQueryDsl};

diesel_newtype! {
    #[derive(Copy)] RequiredFieldId(i64) => diesel::sql_types::BigInt
}

/// Diesel required field struct
///
/// `field_name` is expected to name a [`ProfileField`], but the table does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = required_fields)]
pub struct RequiredField {
    pub id: RequiredFieldId,
    pub field_name: String,
}

impl RequiredField {
    /// Get all required fields in insertion order
    #[tracing::instrument(err, skip_all)]
    pub fn get_all(conn: &mut DbConnection) -> Result<Vec<RequiredField>> {
        let fields = required_fields::table
            .order_by(required_fields::id.asc())
            .load(conn)?;

        Ok(fields)
    }

    /// The profile field this entry refers to, `None` if the name is unknown
    pub fn profile_field(&self) -> Option<ProfileField> {
        self.field_name.parse().ok()
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = required_fields)]
pub struct NewRequiredField {
    pub field_name: String,
}

impl NewRequiredField {
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<RequiredField> {
        let field = diesel::insert_into(required_fields::table)
            .values(self)
            .get_result(conn)?;

        Ok(field)
    }

    #[tracing::instrument(err, skip_all, fields(count = new_fields.len()))]
    pub fn insert_many(
        conn: &mut DbConnection,
        new_fields: Vec<NewRequiredField>,
    ) -> Result<Vec<RequiredField>> {
        let fields = diesel::insert_into(required_fields::table)
            .values(new_fields)
            .get_results(conn)?;

        Ok(fields)
    }
}

impl From<ProfileField> for NewRequiredField {
    fn from(field: ProfileField) -> Self {
        Self {
            field_name: field.as_str().to_owned(),
        }
    }
}
