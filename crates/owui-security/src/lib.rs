// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret handling helpers for the OpenWebUI node adapters.
//!
//! Bearer tokens travel in every request, so anything written to logs or
//! echoed back in error text goes through [`redact`] first.

pub mod redact;

pub use redact::{REDACTED, RedactingWriter, redact};
