// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data file retrieval.

use alloc::string::String;

use wasm_bindgen::JsCast as _;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::WebError;

/// Fetches `path` with an HTTP GET and returns the body as text.
///
/// No timeout is applied; a hung request suspends the caller until the
/// browser gives up.
///
/// # Errors
///
/// [`WebError::Js`] for network failures, [`WebError::Status`] for non-2xx
/// responses, [`WebError::MissingElement`] outside a window context.
pub async fn fetch_text(path: &str) -> Result<String, WebError> {
    let window = web_sys::window().ok_or_else(|| WebError::MissingElement("window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(WebError::Status(response.status()));
    }
    let body = JsFuture::from(response.text()?).await?;
    body.as_string()
        .ok_or_else(|| WebError::Js("response body is not text".into()))
}
