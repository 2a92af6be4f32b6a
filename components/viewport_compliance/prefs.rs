/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tunables of the expected-value resolution and of the result comparison.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Preferences {
    /// The `min-zoom` assumed for the UA stylesheet when it could not be detected.
    pub fallback_min_zoom: f64,
    /// The `max-zoom` assumed for the UA stylesheet when it could not be detected.
    pub fallback_max_zoom: f64,
    /// How far the measured initial scale may stray from the expected one.
    pub zoom_tolerance: f64,
    /// Vendor whose prefixed `@-vendor-viewport` rule the tests write instead
    /// of the standard `@viewport`.
    pub vendor_prefix: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            fallback_min_zoom: 0.25,
            fallback_max_zoom: 5.,
            zoom_tolerance: 0.01,
            vendor_prefix: None,
        }
    }
}

#[derive(Debug)]
pub struct PrefsError(serde_json::Error);

impl fmt::Display for PrefsError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Could not read preferences: {}", self.0)
    }
}

impl std::error::Error for PrefsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl Preferences {
    /// Reads preferences from JSON. Missing entries keep their defaults.
    pub fn from_json(json: &str) -> Result<Preferences, PrefsError> {
        serde_json::from_str(json).map_err(PrefsError)
    }

    /// The at-rule name tests write, e.g. `@viewport` or `@-o-viewport`.
    pub fn at_rule_name(&self) -> String {
        match self.vendor_prefix.as_deref() {
            Some(vendor) if !vendor.is_empty() => format!("@-{vendor}-viewport"),
            _ => "@viewport".to_owned(),
        }
    }
}
