// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secret redaction for anything that leaves the process
//!
//! Every value that becomes visible to the operator (log lines, result JSON,
//! failure messages) passes through [`Credentials::redact`] first.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token substituted for the admin password in results
pub const PRIMARY_MASK: &str = "Authorization";

/// Token substituted for every other secret, and for the password in raw console output
pub const SECRET_MASK: &str = "******";

/// Recursion limit for nested values
pub const MAX_REDACT_DEPTH: usize = 64;

/// Secrets supplied with a task
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Admin password for the console
    pub sadmin_pw: String,
    /// Additional strings to hide wherever they appear
    #[serde(default, deserialize_with = "crate::params::null_as_default")]
    pub other: Vec<String>,
}

// Never print secrets through Debug
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("sadmin_pw", &SECRET_MASK)
            .field("other", &format_args!("[{} hidden]", self.other.len()))
            .finish()
    }
}

impl Credentials {
    pub fn new(sadmin_pw: impl Into<String>) -> Self {
        Self {
            sadmin_pw: sadmin_pw.into(),
            other: Vec::new(),
        }
    }

    pub fn with_other(mut self, secret: impl Into<String>) -> Self {
        self.other.push(secret.into());
        self
    }

    /// Redact a single piece of text
    ///
    /// Mask tokens already in `text` are kept as they are, so redacting twice
    /// gives the same result as redacting once.
    pub fn redact_str(&self, text: &str) -> String {
        let secrets: Vec<&str> = std::iter::once(self.sadmin_pw.as_str())
            .chain(self.other.iter().map(String::as_str))
            .filter(|s| !s.is_empty())
            .collect();
        if secrets.is_empty() {
            return text.to_string();
        }

        let pattern = match self.pattern(&secrets) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!(error = %e, "secret pattern too large, replacing one by one");
                let mut out = replace_secret(text, &self.sadmin_pw, PRIMARY_MASK);
                for secret in &self.other {
                    out = replace_secret(&out, secret, SECRET_MASK);
                }
                return out;
            }
        };
        pattern
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let found = &caps[0];
                if found == self.sadmin_pw {
                    PRIMARY_MASK.to_string()
                } else if self.other.iter().any(|s| s == found) {
                    SECRET_MASK.to_string()
                } else {
                    found.to_string()
                }
            })
            .into_owned()
    }

    /// One alternation over masks and secrets, longest first; masks win ties
    fn pattern(&self, secrets: &[&str]) -> Result<Regex, regex::Error> {
        let mut alternatives: Vec<(usize, bool, &str)> = [PRIMARY_MASK, SECRET_MASK]
            .into_iter()
            .map(|mask| (mask.len(), true, mask))
            .chain(secrets.iter().map(|s| (s.len(), false, *s)))
            .collect();
        alternatives.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        let joined = alternatives
            .iter()
            .map(|(_, _, s)| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&joined)
    }

    /// Redact a structured value, returning a copy of the same shape
    pub fn redact(&self, value: &Value) -> Value {
        redact_value(value, self, 0)
    }

    /// Redact any serializable value by round-tripping through [`Value`]
    pub fn redact_serialized<T: Serialize>(&self, value: &T) -> Result<Value, serde_json::Error> {
        Ok(self.redact(&serde_json::to_value(value)?))
    }
}

/// Mask the admin password in raw console output
pub fn mask_password(text: &str, password: &str) -> String {
    replace_secret(text, password, SECRET_MASK)
}

fn replace_secret(text: &str, secret: &str, mask: &str) -> String {
    // an empty needle would match between every character
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, mask)
}

fn redact_value(value: &Value, creds: &Credentials, depth: usize) -> Value {
    if depth >= MAX_REDACT_DEPTH {
        tracing::warn!(depth, "redaction depth limit reached, masking nested value");
        return match value {
            Value::String(s) => Value::String(creds.redact_str(s)),
            Value::Array(_) | Value::Object(_) => Value::String(SECRET_MASK.to_string()),
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        };
    }
    match value {
        Value::String(s) => Value::String(creds.redact_str(s)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_value(item, creds, depth + 1))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_value(v, creds, depth + 1)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

#[cfg(test)]
#[path = "redact_tests.rs"]
mod tests;
