// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `<video>` element management.
//!
//! Turns the [`PlaybackSpec`]s produced by a
//! [`Spawner`](reeltime_core::instance::Spawner) into absolutely positioned
//! media elements inside a container, and removes each one when its playback
//! ends. The background loop of the random player goes through
//! [`attach_loop`](ClipPresenter::attach_loop).

use reeltime_core::instance::{InstanceId, LoopSpec, PlaybackSpec};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlVideoElement};

use crate::error::WebError;

/// Creates media elements inside one container element.
pub struct ClipPresenter {
    document: Document,
    container: Element,
}

impl core::fmt::Debug for ClipPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClipPresenter")
            .field("container", &"Element")
            .finish_non_exhaustive()
    }
}

impl ClipPresenter {
    /// Creates a presenter for the first element matching `selector`.
    ///
    /// # Errors
    ///
    /// [`WebError::MissingElement`] when nothing matches (or there is no
    /// document), [`WebError::Js`] for an invalid selector.
    pub fn from_selector(selector: &str) -> Result<Self, WebError> {
        let document = document()?;
        let container = document
            .query_selector(selector)?
            .ok_or_else(|| WebError::MissingElement(selector.into()))?;
        Ok(Self {
            document,
            container,
        })
    }

    /// Adds a transient clip for `spec`.
    ///
    /// When playback ends the element is detached from the page and
    /// `on_ended` receives the clip's handle and whether the element was
    /// still there. The listener fires at most once.
    ///
    /// # Errors
    ///
    /// [`WebError::Js`] when the element cannot be created or attached.
    pub fn spawn(
        &self,
        spec: &PlaybackSpec,
        on_ended: impl FnOnce(InstanceId, bool) + 'static,
    ) -> Result<(), WebError> {
        let video = self.video(
            &spec.locator,
            spec.autoplay,
            spec.looping,
            spec.muted,
            spec.plays_inline,
        )?;
        let dom_id = spec.id.dom_id();
        video.set_id(&dom_id);

        let style = video.style();
        style.set_property("position", "absolute")?;
        style.set_property("top", &spec.placement.css_top())?;
        style.set_property("left", &spec.placement.css_left())?;

        let id = spec.id;
        let handler = Closure::once_into_js(move || {
            let found = remove_element_by_id(&dom_id);
            on_ended(id, found);
        });
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        video.add_event_listener_with_callback_and_add_event_listener_options(
            "ended",
            handler.unchecked_ref(),
            &options,
        )?;

        self.container.append_child(&video)?;
        Ok(())
    }

    /// Adds the persistent background clip described by `spec`.
    ///
    /// # Errors
    ///
    /// [`WebError::Js`] when the element cannot be created or attached.
    pub fn attach_loop(&self, spec: &LoopSpec) -> Result<(), WebError> {
        let video = self.video(
            &spec.locator,
            spec.autoplay,
            spec.looping,
            spec.muted,
            spec.plays_inline,
        )?;
        self.container.append_child(&video)?;
        Ok(())
    }

    fn video(
        &self,
        locator: &str,
        autoplay: bool,
        looping: bool,
        muted: bool,
        plays_inline: bool,
    ) -> Result<HtmlVideoElement, WebError> {
        let video: HtmlVideoElement = self.document.create_element("video")?.unchecked_into();
        video.set_src(locator);
        video.set_autoplay(autoplay);
        video.set_loop(looping);
        video.set_muted(muted);
        if plays_inline {
            video.set_attribute("playsinline", "")?;
        }
        Ok(video)
    }
}

/// Detaches the element with `id` from the page. Returns `false` if there is
/// none.
pub fn remove_element_by_id(id: &str) -> bool {
    let Ok(document) = document() else {
        return false;
    };
    match document.get_element_by_id(id) {
        Some(element) => {
            element.remove();
            true
        }
        None => false,
    }
}

fn document() -> Result<Document, WebError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| WebError::MissingElement("document".into()))
}
