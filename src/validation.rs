//! Field-level request checks.
//!
//! Handlers run every check for a request through [`Checks`] and only then
//! call [`Checks::finish`], so the client receives the complete list of
//! failures in one `400` response instead of the first one only.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// One failed check, shaped the way clients of this API already parse it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub value: Value,
    pub msg: String,
    pub param: String,
    pub location: &'static str,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `param` unless `ok` holds.
    pub fn check<V: Serialize>(&mut self, param: &str, value: V, ok: bool, msg: impl Into<String>) -> &mut Self {
        if !ok {
            self.errors.push(FieldError {
                value: serde_json::to_value(value).unwrap_or(Value::Null),
                msg: msg.into(),
                param: param.to_string(),
                location: "body",
            });
        }
        self
    }

    pub fn email(&mut self, param: &str, value: Option<&str>, msg: &str) -> &mut Self {
        let ok = value.map(is_valid_email).unwrap_or(false);
        self.check(param, value, ok, msg)
    }

    pub fn not_empty(&mut self, param: &str, value: Option<&str>, msg: &str) -> &mut Self {
        let ok = value.map(|v| !v.trim().is_empty()).unwrap_or(false);
        self.check(param, value, ok, msg)
    }

    pub fn min_len(&mut self, param: &str, value: Option<&str>, min: usize, msg: &str) -> &mut Self {
        let ok = value.map(|v| v.chars().count() >= min).unwrap_or(false);
        self.check(param, value, ok, msg)
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}
