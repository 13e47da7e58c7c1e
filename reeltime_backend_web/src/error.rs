// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors from browser calls.

use alloc::format;
use alloc::string::String;
use core::fmt;

use reeltime_core::error::LoadError;
use reeltime_core::trace::{FaultEvent, FaultKind, Tracer};
use wasm_bindgen::{JsCast as _, JsValue};

/// Errors from [`fetch_text`](crate::fetch_text), the presenter and page
/// configuration.
#[derive(Debug)]
pub enum WebError {
    /// A browser API threw or rejected.
    Js(String),
    /// The response was not a success status.
    Status(u16),
    /// A data file could not be parsed.
    Load(LoadError),
    /// A required page element (or the window/document) is missing.
    MissingElement(String),
}

impl WebError {
    /// Reports this error to `tracer` as a [`FaultEvent`] about `subject`.
    ///
    /// `fallback` is the fault kind used for [`WebError::Js`], whose origin
    /// only the caller knows.
    pub fn report(&self, tracer: &mut Tracer<'_>, fallback: FaultKind, subject: &str) {
        let kind = match self {
            Self::Js(_) => fallback,
            Self::Status(_) => FaultKind::Fetch,
            Self::Load(_) => FaultKind::Parse,
            Self::MissingElement(_) => FaultKind::MissingElement,
        };
        let message = format!("{self}");
        tracer.fault(&FaultEvent {
            kind,
            subject,
            message: &message,
        });
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Js(message) => f.write_str(message),
            Self::Status(status) => write!(f, "HTTP {status}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::MissingElement(what) => write!(f, "no element matches {what}"),
        }
    }
}

impl core::error::Error for WebError {}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

impl From<LoadError> for WebError {
    fn from(err: LoadError) -> Self {
        Self::Load(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;

    #[test]
    fn display() {
        assert_eq!(WebError::Status(404).to_string(), "HTTP 404");
        assert_eq!(
            WebError::MissingElement(".container".into()).to_string(),
            "no element matches .container"
        );
        assert_eq!(
            WebError::Load(LoadError::NotAnArray).to_string(),
            "expected a JSON array"
        );
    }
}
