// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Completeness evaluation and form based updates of user profiles
use database::{DatabaseError, Db};
use db_storage::required_fields::RequiredField;
use db_storage::users::{UpdateUser, User, UserId};
use serde::Serialize;
use std::collections::BTreeMap;

/// A submitted form, maps field names to their new values
pub type Submission = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("User not found")]
    NotFound,
    #[error("{0}")]
    Internal(String),
}

impl From<DatabaseError> for ProfileError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::NotFound => Self::NotFound,
            e => Self::Internal(e.to_string()),
        }
    }
}

impl From<crate::BlockingError> for ProfileError {
    fn from(e: crate::BlockingError) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Record store of users and the required field configuration
///
/// All calls are blocking and must be run with [`crate::block`] inside of async contexts.
pub trait ProfileStore: Send + Sync + 'static {
    /// Fails with [`ProfileError::NotFound`] if the user does not exist
    fn user(&self, user_id: UserId) -> Result<User, ProfileError>;

    /// The required field configuration in insertion order
    fn required_fields(&self) -> Result<Vec<RequiredField>, ProfileError>;

    /// Persist `changeset` for the given user in a single write
    ///
    /// Fails with [`ProfileError::NotFound`] if the user does not exist
    fn update_user(&self, user_id: UserId, changeset: UpdateUser) -> Result<User, ProfileError>;
}

impl ProfileStore for Db {
    fn user(&self, user_id: UserId) -> Result<User, ProfileError> {
        let mut conn = self.get_conn()?;

        Ok(User::get(&mut conn, user_id)?)
    }

    fn required_fields(&self) -> Result<Vec<RequiredField>, ProfileError> {
        let mut conn = self.get_conn()?;

        Ok(RequiredField::get_all(&mut conn)?)
    }

    fn update_user(&self, user_id: UserId, changeset: UpdateUser) -> Result<User, ProfileError> {
        let mut conn = self.get_conn()?;

        Ok(changeset.apply(&mut conn, user_id)?)
    }
}

/// The required fields a user has not filled in yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingFields {
    pub user_id: UserId,
    pub missing_fields: Vec<String>,
}

/// Evaluate which required fields are unset for the given user
#[tracing::instrument(err, skip(store))]
pub fn missing_fields(
    store: &dyn ProfileStore,
    user_id: UserId,
) -> Result<MissingFields, ProfileError> {
    let user = store.user(user_id)?;
    let required = store.required_fields()?;

    Ok(MissingFields {
        user_id,
        missing_fields: user.missing_fields(&required),
    })
}

/// Apply the updatable fields of a form submission to the given user
///
/// Unknown fields as well as the first and last name are ignored.
#[tracing::instrument(err, skip(store, submission))]
pub fn update_fields(
    store: &dyn ProfileStore,
    user_id: UserId,
    submission: &Submission,
) -> Result<(), ProfileError> {
    let changeset = UpdateUser::from_submission(submission);

    store.update_user(user_id, changeset)?;

    Ok(())
}
