// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Services that expose clean APIs and hide implementation details from endpoints
mod forwarder;
mod profile;

pub use forwarder::SubmissionForwarder;
pub use profile::{
    missing_fields, update_fields, MissingFields, ProfileError, ProfileStore, Submission,
};

#[cfg(test)]
pub(crate) use profile::test_store::MemoryStore;
