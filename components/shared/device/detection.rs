/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Ordering of the page loads that measure the device facts.
//!
//! Each page load measures one phase under a dedicated viewport meta tag and
//! records the result before moving on to the next phase.

use log::{debug, warn};

use crate::facts::{DeviceFacts, known};

/// The meta content used by test pages once every phase has been measured.
pub const COMPLETED_META_CONTENT: &str = "initial-scale=1.0";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DetectionPhase {
    /// Computed size of 1em and 1ex.
    Lengths,
    DeviceSize,
    AvailableSize,
    /// Viewport width under the UA stylesheet alone.
    DefaultWidth,
    MinWidth,
    MaxWidth,
    MinScale,
    MaxScale,
    DefaultMinZoom,
    DefaultMaxZoom,
}

/// What a phase measured on the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhaseMeasurement {
    Lengths { em: f64, ex: f64 },
    /// The offset size of the test container.
    Container { width: f64, height: f64 },
}

impl DetectionPhase {
    pub const ALL: [DetectionPhase; 10] = [
        DetectionPhase::Lengths,
        DetectionPhase::DeviceSize,
        DetectionPhase::AvailableSize,
        DetectionPhase::DefaultWidth,
        DetectionPhase::MinWidth,
        DetectionPhase::MaxWidth,
        DetectionPhase::MinScale,
        DetectionPhase::MaxScale,
        DetectionPhase::DefaultMinZoom,
        DetectionPhase::DefaultMaxZoom,
    ];

    /// The first phase whose fact is still unknown, or `None` once detection
    /// is complete.
    pub fn next(facts: &DeviceFacts) -> Option<DetectionPhase> {
        DetectionPhase::ALL
            .into_iter()
            .find(|phase| phase.gating_fact(facts).is_none())
    }

    /// The fact whose absence means this phase still has to run.
    fn gating_fact(self, facts: &DeviceFacts) -> Option<f64> {
        match self {
            DetectionPhase::Lengths => facts.em_size,
            DetectionPhase::DeviceSize => facts.device_width,
            DetectionPhase::AvailableSize => facts.available_width,
            DetectionPhase::DefaultWidth => facts.desktop_width,
            DetectionPhase::MinWidth => facts.min_meta_width,
            DetectionPhase::MaxWidth => facts.max_meta_width,
            DetectionPhase::MinScale => facts.min_scale_ref_width,
            DetectionPhase::MaxScale => facts.max_scale_ref_width,
            DetectionPhase::DefaultMinZoom => facts.default_min_zoom_ref_width,
            DetectionPhase::DefaultMaxZoom => facts.default_max_zoom_ref_width,
        }
    }

    /// The viewport meta content the page carries while this phase measures.
    pub fn meta_content(self) -> Option<&'static str> {
        match self {
            DetectionPhase::Lengths | DetectionPhase::DefaultWidth => None,
            DetectionPhase::DeviceSize => Some("width=device-width, height=device-height"),
            DetectionPhase::AvailableSize => Some("initial-scale=1.0"),
            DetectionPhase::MinWidth => Some("width=1,minimum-scale=0,maximum-scale=100"),
            DetectionPhase::MaxWidth => Some("width=20000,minimum-scale=0,maximum-scale=100"),
            DetectionPhase::MinScale => Some("initial-scale=0.01,minimum-scale=0,maximum-scale=100"),
            DetectionPhase::MaxScale => Some("initial-scale=100,minimum-scale=0,maximum-scale=100"),
            DetectionPhase::DefaultMinZoom => Some("initial-scale=0.01"),
            DetectionPhase::DefaultMaxZoom => Some("initial-scale=100"),
        }
    }
}

impl DeviceFacts {
    /// Store what `phase` measured. A measurement of the wrong shape for the
    /// phase leaves the facts untouched.
    pub fn record(&mut self, phase: DetectionPhase, measurement: PhaseMeasurement) {
        debug!("Recording {measurement:?} for {phase:?}");
        match (phase, measurement) {
            (DetectionPhase::Lengths, PhaseMeasurement::Lengths { em, ex }) => {
                self.em_size = known(em);
                self.ex_size = known(ex);
            },
            (DetectionPhase::DeviceSize, PhaseMeasurement::Container { width, height }) => {
                self.device_width = known(width);
                self.device_height = known(height);
            },
            (DetectionPhase::AvailableSize, PhaseMeasurement::Container { width, height }) => {
                self.available_width = known(width);
                self.available_height = known(height);
            },
            (DetectionPhase::DefaultWidth, PhaseMeasurement::Container { width, .. }) => {
                self.desktop_width = known(width)
            },
            (DetectionPhase::MinWidth, PhaseMeasurement::Container { width, .. }) => {
                self.min_meta_width = known(width)
            },
            (DetectionPhase::MaxWidth, PhaseMeasurement::Container { width, .. }) => {
                self.max_meta_width = known(width)
            },
            (DetectionPhase::MinScale, PhaseMeasurement::Container { width, .. }) => {
                self.min_scale_ref_width = known(width)
            },
            (DetectionPhase::MaxScale, PhaseMeasurement::Container { width, .. }) => {
                self.max_scale_ref_width = known(width)
            },
            (DetectionPhase::DefaultMinZoom, PhaseMeasurement::Container { width, .. }) => {
                self.default_min_zoom_ref_width = known(width)
            },
            (DetectionPhase::DefaultMaxZoom, PhaseMeasurement::Container { width, .. }) => {
                self.default_max_zoom_ref_width = known(width)
            },
            (DetectionPhase::Lengths, PhaseMeasurement::Container { .. }) |
            (_, PhaseMeasurement::Lengths { .. }) => {
                warn!("Ignoring {measurement:?}, which does not fit phase {phase:?}");
            },
        }
    }
}
