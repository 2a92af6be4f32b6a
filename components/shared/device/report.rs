/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt;

use crate::DeviceEnvironment;

/// The detected values of a [`DeviceEnvironment`], formatted for display
/// once detection has finished.
pub struct DeviceReport<'a> {
    device: &'a DeviceEnvironment,
}

/// A fact followed by its unit, or `unknown`.
struct Fact(Option<f64>, &'static str);

impl fmt::Display for Fact {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(value) => write!(formatter, "{value}{}", self.1),
            None => formatter.write_str("unknown"),
        }
    }
}

impl<'a> DeviceReport<'a> {
    pub(crate) fn new(device: &'a DeviceEnvironment) -> Self {
        DeviceReport { device }
    }
}

impl fmt::Display for DeviceReport<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let device = self.device;
        writeln!(formatter, "resolution: {}", Fact(device.resolution_dpi(), "dpi"))?;
        writeln!(
            formatter,
            "device-pixel-ratio: {}",
            Fact(device.device_pixel_ratio_percent(), "%")
        )?;
        writeln!(formatter, "initial-width: {}", Fact(device.available_width(None), "px"))?;
        writeln!(formatter, "initial-height: {}", Fact(device.available_height(None), "px"))?;
        writeln!(formatter, "device-width: {}", Fact(device.device_width(None), "px"))?;
        writeln!(formatter, "device-height: {}", Fact(device.device_height(None), "px"))?;
        writeln!(formatter, "1em: {}", Fact(device.one_em(), "px"))?;
        writeln!(formatter, "1ex: {}", Fact(device.one_ex(), "px"))?;
        writeln!(formatter, "UA style rules:")?;
        writeln!(formatter, "@viewport {{")?;
        writeln!(formatter, "    width: {};", Fact(device.desktop_width(), "px"))?;
        writeln!(formatter, "    min-zoom: {};", Fact(device.default_min_zoom(), ""))?;
        writeln!(formatter, "    max-zoom: {};", Fact(device.default_max_zoom(), ""))?;
        writeln!(formatter, "}}")
    }
}
