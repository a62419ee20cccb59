// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Response types of the REST API
mod error;

pub use error::{json_error_handler, ApiError, SubmissionError};
