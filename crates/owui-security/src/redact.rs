// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Masks OpenWebUI tokens in log lines and error text.
//!
//! Token shapes (Bearer headers, JWTs, `sk-` keys) are matched by pattern;
//! tokens loaded from configuration are additionally matched verbatim, which
//! covers opaque keys no pattern recognizes.

use std::io::Write;
use std::sync::{Arc, LazyLock, RwLock};

use regex::Regex;

/// Token shapes masked regardless of the configured credentials.
static REDACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Bearer tokens in headers
        r"Bearer\s+[a-zA-Z0-9._\-]{10,}",
        // Bare JWTs: header.payload.signature, base64url, header always starts with eyJ
        r"eyJ[a-zA-Z0-9_\-]{5,}\.[a-zA-Z0-9_\-]{5,}\.[a-zA-Z0-9_\-]+",
        // OpenWebUI API keys: sk-<hex>
        r"sk-[a-zA-Z0-9]{20,}",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// The redaction placeholder.
pub const REDACTED: &str = "[REDACTED]";

/// Redact secrets from a string using regex patterns and exact known values.
pub fn redact(input: &str, known_secrets: &[String]) -> String {
    let mut result = input.to_string();

    for pattern in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, REDACTED).to_string();
    }

    // Longest first so a secret containing another is replaced whole.
    let mut sorted: Vec<&String> = known_secrets.iter().collect();
    sorted.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted {
        if !value.is_empty() {
            result = result.replace(value.as_str(), REDACTED);
        }
    }

    result
}

/// `io::Write` adapter that masks tokens before forwarding to `inner`.
///
/// Used as the `tracing-subscriber` writer so that log lines never carry a
/// token, even when an upstream error message echoes request headers.
pub struct RedactingWriter<W> {
    inner: W,
    known_secrets: Arc<RwLock<Vec<String>>>,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, known_secrets: Arc<RwLock<Vec<String>>>) -> Self {
        Self {
            inner,
            known_secrets,
        }
    }

    /// Registers a secret for exact-match redaction.
    pub fn add_secret(known_secrets: &Arc<RwLock<Vec<String>>>, value: String) {
        if let Ok(mut values) = known_secrets.write()
            && !value.is_empty()
            && !values.contains(&value)
        {
            values.push(value);
        }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        let secrets = self
            .known_secrets
            .read()
            .map(|v| v.clone())
            .unwrap_or_default();
        let redacted = redact(&input, &secrets);
        self.inner.write_all(redacted.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
