// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Contains the user specific database structs and queries
use super::fields::ProfileField;
use super::required_fields::RequiredField;
use super::schema::users;
use database::{DbConnection, Result};
use diesel::{
    AsChangeset, ExpressionMethods, Identifiable, Insertable, QueryDsl, Queryable, RunQueryDsl,
};

diesel_newtype! {
    #[derive(Copy)] UserId(i64) => diesel::sql_types::BigInt
}

/// Diesel user struct
///
/// Is used as a result in various queries. Represents a user column
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub sex: Option<String>,
    pub current_address: Option<String>,
}

impl User {
    /// Get a user with the given id
    ///
    /// Returns [`DatabaseError::NotFound`](database::DatabaseError::NotFound) if the user does not exist
    #[tracing::instrument(err, skip_all, fields(%user_id))]
    pub fn get(conn: &mut DbConnection, user_id: UserId) -> Result<User> {
        let user = users::table
            .filter(users::id.eq(user_id))
            .get_result(conn)?;

        Ok(user)
    }

    /// Get all users ordered by their id
    #[tracing::instrument(err, skip_all)]
    pub fn get_all(conn: &mut DbConnection) -> Result<Vec<User>> {
        let users = users::table.order_by(users::id.asc()).load(conn)?;

        Ok(users)
    }

    /// Returns the value of the given attribute, `None` if it is unset
    pub fn field(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::FirstName => self.first_name.as_deref(),
            ProfileField::LastName => self.last_name.as_deref(),
            ProfileField::BirthDate => self.birth_date.as_deref(),
            ProfileField::BirthPlace => self.birth_place.as_deref(),
            ProfileField::Sex => self.sex.as_deref(),
            ProfileField::CurrentAddress => self.current_address.as_deref(),
        }
    }

    /// Returns the names of all `required` fields that are unset for this user
    ///
    /// The names keep the order of `required`. Names which do not refer to a known
    /// [`ProfileField`] are never reported as missing.
    pub fn missing_fields<'a, I>(&self, required: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a RequiredField>,
    {
        required
            .into_iter()
            .filter(|required_field| match required_field.profile_field() {
                Some(field) => self.field(field).is_none(),
                None => {
                    log::trace!(
                        "Skipping unknown required field `{}`",
                        required_field.field_name
                    );
                    false
                }
            })
            .map(|required_field| required_field.field_name.clone())
            .collect()
    }
}

/// Diesel insertable user struct
///
/// Represents fields that have to be provided on user insertion.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub sex: Option<String>,
    pub current_address: Option<String>,
}

impl NewUser {
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<User> {
        let user = diesel::insert_into(users::table)
            .values(self)
            .get_result(conn)?;

        Ok(user)
    }

    #[tracing::instrument(err, skip_all, fields(count = new_users.len()))]
    pub fn insert_many(conn: &mut DbConnection, new_users: Vec<NewUser>) -> Result<Vec<User>> {
        let users = diesel::insert_into(users::table)
            .values(new_users)
            .get_results(conn)?;

        Ok(users)
    }
}

/// Diesel user struct for updates
///
/// Only contains the attributes which may be changed by a form submission.
/// `None` fields will be ignored on update queries.
#[derive(Debug, Default, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = users)]
pub struct UpdateUser {
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub sex: Option<String>,
    pub current_address: Option<String>,
}

impl UpdateUser {
    /// Build a changeset from submitted `name -> value` pairs
    ///
    /// Pairs whose name is unknown or refers to a field which is not updatable are dropped.
    pub fn from_submission<I, K, V>(submission: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut changeset = Self::default();

        for (name, value) in submission {
            let name = name.as_ref();

            match name.parse::<ProfileField>() {
                Ok(field) => {
                    if !changeset.set(field, value.into()) {
                        log::debug!("Ignoring submitted value for non-updatable field `{name}`");
                    }
                }
                Err(_) => log::debug!("Ignoring submitted value for unknown field `{name}`"),
            }
        }

        changeset
    }

    /// Set the given attribute
    ///
    /// Returns false and leaves the changeset untouched if the field is not updatable.
    pub fn set(&mut self, field: ProfileField, value: String) -> bool {
        if !field.is_form_updatable() {
            return false;
        }

        let slot = match field {
            // rejected by `is_form_updatable` above
            ProfileField::FirstName | ProfileField::LastName => return false,
            ProfileField::BirthDate => &mut self.birth_date,
            ProfileField::BirthPlace => &mut self.birth_place,
            ProfileField::Sex => &mut self.sex,
            ProfileField::CurrentAddress => &mut self.current_address,
        };

        *slot = Some(value);

        true
    }

    pub fn is_empty(&self) -> bool {
        let UpdateUser {
            birth_date,
            birth_place,
            sex,
            current_address,
        } = self;

        birth_date.is_none() && birth_place.is_none() && sex.is_none() && current_address.is_none()
    }

    /// Apply the changeset to an already loaded user
    ///
    /// In-memory counterpart of [`UpdateUser::apply`], leaves the database untouched.
    pub fn apply_to(&self, user: &mut User) {
        let UpdateUser {
            birth_date,
            birth_place,
            sex,
            current_address,
        } = self.clone();

        if birth_date.is_some() {
            user.birth_date = birth_date;
        }
        if birth_place.is_some() {
            user.birth_place = birth_place;
        }
        if sex.is_some() {
            user.sex = sex;
        }
        if current_address.is_some() {
            user.current_address = current_address;
        }
    }

    /// Apply the changeset to the user with the given id in a single `UPDATE` statement
    ///
    /// An empty changeset only checks that the user exists.
    /// Returns [`DatabaseError::NotFound`](database::DatabaseError::NotFound) if the user does not exist
    #[tracing::instrument(err, skip_all, fields(%user_id))]
    pub fn apply(self, conn: &mut DbConnection, user_id: UserId) -> Result<User> {
        if self.is_empty() {
            return User::get(conn, user_id);
        }

        let target = users::table.filter(users::id.eq(user_id));
        let user = diesel::update(target).set(self).get_result(conn)?;

        Ok(user)
    }
}
