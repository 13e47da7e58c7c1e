// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Player configuration.
//!
//! Every field has a default matching the stock page, and every field is
//! optional when deserializing, so a page only spells out what it overrides:
//!
//! ```json
//! { "metadata_path": "./data/clips.json", "banner": null, "max_live": 12 }
//! ```

use alloc::string::String;

use serde::Deserialize;

use crate::error::LoadError;
use crate::placement::PlacementRange;
use crate::schedule::SchedulerConfig;
use crate::zone::{ClockFormat, HourCycle, ZoneRule};

/// The disclaimer banner removed some time after load.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// Element id of the banner.
    pub element_id: String,
    /// Delay after page load before removal.
    pub delay_ms: u32,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            element_id: "disclaimer".into(),
            delay_ms: 30_000,
        }
    }
}

/// Configuration for the time-matched player.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Path of the video metadata document.
    pub metadata_path: String,
    /// Selector of the element clips are appended to.
    pub container_selector: String,
    /// Disclaimer banner, or `None` to leave the page alone.
    pub banner: Option<BannerConfig>,
    /// Tick cadence and refresh policy.
    pub scheduler: SchedulerConfig,
    /// Placement ranges for spawned clips.
    pub placement: PlacementRange,
    /// Hour rendering for the clock.
    pub hour_cycle: HourCycle,
    /// Upper bound on clips on screen at once; `None` for no bound.
    pub max_live: Option<usize>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            metadata_path: "./video_metadata.json".into(),
            container_selector: ".container".into(),
            banner: Some(BannerConfig::default()),
            scheduler: SchedulerConfig::web(),
            placement: PlacementRange::default(),
            hour_cycle: HourCycle::default(),
            max_live: None,
        }
    }
}

impl PlayerConfig {
    /// Parses a (possibly partial) configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if the document is malformed or a field
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The clock used for matching: the fixed zone with the configured hour
    /// cycle.
    #[must_use]
    pub fn clock_format(&self) -> ClockFormat {
        ClockFormat {
            zone: ZoneRule::america_new_york(),
            hour_cycle: self.hour_cycle,
        }
    }
}

/// Configuration for the random looping player.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Path of the locator list.
    pub locators_path: String,
    /// Selector of the element the loop is appended to.
    pub container_selector: String,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            locators_path: "./video_list.json".into(),
            container_selector: ".container".into(),
        }
    }
}

impl LoopConfig {
    /// Parses a (possibly partial) configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if the document is malformed or a field
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Span;
    use crate::schedule::RefreshPolicy;

    #[test]
    fn empty_document_is_the_default() {
        assert_eq!(PlayerConfig::from_json("{}").unwrap(), PlayerConfig::default());
        assert_eq!(LoopConfig::from_json("{}").unwrap(), LoopConfig::default());
    }

    #[test]
    fn defaults_match_the_stock_page() {
        let config = PlayerConfig::default();
        assert_eq!(config.metadata_path, "./video_metadata.json");
        assert_eq!(config.container_selector, ".container");
        let banner = config.banner.unwrap();
        assert_eq!(banner.element_id, "disclaimer");
        assert_eq!(banner.delay_ms, 30_000);
        assert_eq!(config.scheduler.tick_period_ms, 1000);
        assert_eq!(config.placement.top_vh, Span::new(-10.0, 30.0));
        assert_eq!(config.placement.left_vw, Span::new(-15.0, 45.0));
        assert_eq!(config.max_live, None);
    }

    #[test]
    fn partial_overrides() {
        let config = PlayerConfig::from_json(
            r#"{
                "metadata_path": "./data/clips.json",
                "banner": null,
                "hour_cycle": "h23",
                "scheduler": { "refresh": { "interval_ms": 120000 } },
                "placement": { "top_vh": { "min": 0, "max": 10 } },
                "max_live": 8
            }"#,
        )
        .unwrap();
        assert_eq!(config.metadata_path, "./data/clips.json");
        assert_eq!(config.container_selector, ".container");
        assert_eq!(config.banner, None);
        assert_eq!(config.hour_cycle, HourCycle::H23);
        assert_eq!(config.scheduler.refresh, RefreshPolicy::IntervalMs(120_000));
        assert_eq!(config.scheduler.tick_period_ms, 1000);
        assert_eq!(config.placement.top_vh, Span::new(0.0, 10.0));
        assert_eq!(config.placement.left_vw, Span::new(-15.0, 45.0));
        assert_eq!(config.max_live, Some(8));
        assert_eq!(config.clock_format().zone.name(), "America/New_York");
    }

    #[test]
    fn banner_delay_only() {
        let config = PlayerConfig::from_json(r#"{"banner": {"delay_ms": 5000}}"#).unwrap();
        let banner = config.banner.unwrap();
        assert_eq!(banner.element_id, "disclaimer");
        assert_eq!(banner.delay_ms, 5000);
    }

    #[test]
    fn wrong_types_are_errors() {
        assert!(matches!(
            PlayerConfig::from_json(r#"{"max_live": "lots"}"#),
            Err(LoadError::Json(_))
        ));
        assert!(LoopConfig::from_json("not json").is_err());
    }
}
