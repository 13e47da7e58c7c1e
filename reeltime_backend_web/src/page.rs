// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline page configuration.
//!
//! A page may carry a `<script type="application/json" id="reeltime-config">`
//! element whose text overrides the player defaults. Its absence is normal;
//! a malformed one is reported and ignored.

use alloc::format;
use alloc::string::String;

use reeltime_core::error::LoadError;
use reeltime_core::trace::{FaultEvent, FaultKind, Tracer};

/// Element id looked up by [`load_page_config`].
pub const CONFIG_ELEMENT_ID: &str = "reeltime-config";

/// Reads the configuration embedded in the element with `element_id`.
///
/// Returns `T::default()` when the element is missing or empty, and also when
/// `parse` fails, after reporting a [`FaultKind::Config`] fault.
pub fn load_page_config<T: Default>(
    element_id: &str,
    parse: impl FnOnce(&str) -> Result<T, LoadError>,
    tracer: &mut Tracer<'_>,
) -> T {
    let text = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(element_id))
        .and_then(|element| element.text_content());
    resolve(element_id, text, parse, tracer)
}

fn resolve<T: Default>(
    element_id: &str,
    text: Option<String>,
    parse: impl FnOnce(&str) -> Result<T, LoadError>,
    tracer: &mut Tracer<'_>,
) -> T {
    let Some(text) = text.filter(|text| !text.trim().is_empty()) else {
        return T::default();
    };
    match parse(&text) {
        Ok(config) => config,
        Err(err) => {
            let message = format!("{err}; using defaults");
            tracer.fault(&FaultEvent {
                kind: FaultKind::Config,
                subject: element_id,
                message: &message,
            });
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reeltime_core::config::PlayerConfig;

    #[test]
    fn missing_or_blank_element_gives_defaults() {
        let mut tracer = Tracer::none();
        let config = resolve(CONFIG_ELEMENT_ID, None, PlayerConfig::from_json, &mut tracer);
        assert_eq!(config, PlayerConfig::default());

        let config = resolve(
            CONFIG_ELEMENT_ID,
            Some("  \n ".into()),
            PlayerConfig::from_json,
            &mut tracer,
        );
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let mut tracer = Tracer::none();
        let config = resolve(
            CONFIG_ELEMENT_ID,
            Some(r#"{ "metadata_path": "./clips.json", "banner": null }"#.into()),
            PlayerConfig::from_json,
            &mut tracer,
        );
        assert_eq!(config.metadata_path, "./clips.json");
        assert_eq!(config.banner, None);
    }

    #[test]
    fn malformed_config_falls_back() {
        let mut tracer = Tracer::none();
        let config = resolve(
            CONFIG_ELEMENT_ID,
            Some("{ not json".into()),
            PlayerConfig::from_json,
            &mut tracer,
        );
        assert_eq!(config, PlayerConfig::default());
    }
}
