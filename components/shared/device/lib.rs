/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! An immutable snapshot of the device facts that the viewport tests resolve
//! their expectations against.
//!
//! Facts that have not been measured are surfaced as `None` by every accessor
//! that depends on them. Nothing here guesses a value for a missing fact.

#![deny(unsafe_code)]

mod detection;
mod facts;
mod report;

use log::debug;

pub use crate::detection::{COMPLETED_META_CONTENT, DetectionPhase, PhaseMeasurement};
pub use crate::facts::{DeviceFacts, FactsError};
pub use crate::report::DeviceReport;

/// One CSS "px" in the coordinate system of the initial viewport.
#[derive(Clone, Copy, Debug)]
pub enum CSSPixel {}

/// A pixel of the visual viewport, which the initial zoom maps CSS pixels onto.
#[derive(Clone, Copy, Debug)]
pub enum VisualPixel {}

/// The length of one CSS inch in CSS pixels.
pub const CSS_PIXELS_PER_INCH: f64 = 96.;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceEnvironment {
    facts: DeviceFacts,
}

impl DeviceEnvironment {
    pub fn new(facts: DeviceFacts) -> DeviceEnvironment {
        let unknown: Vec<_> = facts.unknown_keys().collect();
        if !unknown.is_empty() {
            debug!("Device environment created with unknown facts: {unknown:?}");
        }
        DeviceEnvironment { facts }
    }

    /// Build an environment from the query part of a harness URL.
    pub fn from_query(query: &str) -> Result<DeviceEnvironment, FactsError> {
        DeviceFacts::from_query(query).map(DeviceEnvironment::new)
    }

    pub fn facts(&self) -> &DeviceFacts {
        &self.facts
    }

    /// A textual summary of the detected values.
    pub fn report(&self) -> DeviceReport<'_> {
        DeviceReport::new(self)
    }

    /// The native resolution of the device, in DPI.
    pub fn resolution_dpi(&self) -> Option<f64> {
        self.facts.resolution_dpi
    }

    /// The default ratio of device px per CSS px, in percent.
    pub fn device_pixel_ratio_percent(&self) -> Option<f64> {
        self.facts.device_pixel_ratio
    }

    /// Return the length in CSS px of `length` scaled using `target_dpi`
    /// instead of this device's actual DPI.
    pub fn scale_to_dpi(&self, length: f64, target_dpi: f64) -> Option<f64> {
        // length * device-pixel-ratio / 100 is the length in device pixels.
        let ratio = self.device_pixel_ratio_percent()?;
        let dpi = self.resolution_dpi()?;
        Some(length * ratio * target_dpi / (100. * dpi))
    }

    fn scaled(&self, length: Option<f64>, target_dpi: Option<f64>) -> Option<f64> {
        match target_dpi {
            Some(target_dpi) => self.scale_to_dpi(length?, target_dpi),
            None => length,
        }
    }

    /// The available width a.k.a. initial width, scaled to `target_dpi` if given.
    pub fn available_width(&self, target_dpi: Option<f64>) -> Option<f64> {
        self.scaled(self.facts.available_width, target_dpi)
    }

    /// The available height a.k.a. initial height, scaled to `target_dpi` if given.
    pub fn available_height(&self, target_dpi: Option<f64>) -> Option<f64> {
        self.scaled(self.facts.available_height, target_dpi)
    }

    pub fn device_width(&self, target_dpi: Option<f64>) -> Option<f64> {
        self.scaled(self.facts.device_width, target_dpi)
    }

    pub fn device_height(&self, target_dpi: Option<f64>) -> Option<f64> {
        self.scaled(self.facts.device_height, target_dpi)
    }

    /// The viewport width after applying the UA stylesheet. Desktop width
    /// detection does not take a target density into account.
    pub fn desktop_width(&self) -> Option<f64> {
        self.facts.desktop_width
    }

    /// The smallest width this UA accepts in viewport meta.
    pub fn minimum_meta_width(&self) -> Option<f64> {
        self.facts.min_meta_width
    }

    /// The largest width this UA accepts in viewport meta.
    pub fn maximum_meta_width(&self) -> Option<f64> {
        self.facts.max_meta_width
    }

    /// The zoom that made the layout viewport `reference_width` wide.
    fn zoom_from_reference(&self, reference_width: Option<f64>) -> Option<f64> {
        let reference_width = reference_width.filter(|width| *width > 0.)?;
        Some(self.available_width(None)? / reference_width)
    }

    /// The smallest scale factor this UA allows in viewport meta.
    pub fn minimum_scale(&self) -> Option<f64> {
        self.zoom_from_reference(self.facts.min_scale_ref_width)
    }

    /// The largest scale factor this UA allows in viewport meta.
    pub fn maximum_scale(&self) -> Option<f64> {
        self.zoom_from_reference(self.facts.max_scale_ref_width)
    }

    /// The `min-zoom` of the UA stylesheet.
    pub fn default_min_zoom(&self) -> Option<f64> {
        self.zoom_from_reference(self.facts.default_min_zoom_ref_width)
    }

    /// The `max-zoom` of the UA stylesheet.
    pub fn default_max_zoom(&self) -> Option<f64> {
        self.zoom_from_reference(self.facts.default_max_zoom_ref_width)
    }

    pub fn one_em(&self) -> Option<f64> {
        self.facts.em_size
    }

    pub fn one_ex(&self) -> Option<f64> {
        self.facts.ex_size
    }

    pub fn one_inch(&self) -> f64 {
        CSS_PIXELS_PER_INCH
    }

    pub fn one_cm(&self) -> f64 {
        self.one_inch() / 2.54
    }

    pub fn one_mm(&self) -> f64 {
        self.one_cm() / 10.
    }

    pub fn one_point(&self) -> f64 {
        self.one_inch() / 72.
    }

    pub fn one_pica(&self) -> f64 {
        self.one_inch() / 6.
    }
}
