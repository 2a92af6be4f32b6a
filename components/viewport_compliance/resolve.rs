/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The constraining procedure.
//!
//! Step numbers refer to
//! <https://drafts.csswg.org/css-device-adapt/#constraining-procedure>.
//! All arithmetic is done on `f64` without rounding. Unknown device facts
//! enter as NaN and propagate through to the result.

use euclid::{Scale, Size2D};
use log::debug;
use rayon::prelude::*;
use viewport_device::{CSSPixel, DeviceEnvironment, VisualPixel};

use crate::constraints::{Declared, TestConstraints};
use crate::prefs::Preferences;

/// The viewport a page is expected to end up with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedViewport {
    pub size: Size2D<f64, CSSPixel>,
    pub initial_zoom: Scale<f64, CSSPixel, VisualPixel>,
    /// The density device lengths were rescaled to, if the test asked for one.
    pub target_dpi: Option<f64>,
}

impl ResolvedViewport {
    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn zoom(&self) -> f64 {
        self.initial_zoom.get()
    }
}

/// `Math.max` semantics: NaN in, NaN out.
#[inline]
fn max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

#[inline]
fn min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

/// Zero and NaN count as "not given", for both the target density and the
/// detected UA zoom limits.
#[inline]
fn given(value: f64) -> bool {
    value != 0. && !value.is_nan()
}

/// Constrain `initial` by whichever of the bounds exist.
fn constrain(lower: Option<f64>, upper: Option<f64>, initial: f64) -> Option<f64> {
    match (lower, upper) {
        (Some(lower), Some(upper)) => Some(max(lower, min(upper, initial))),
        (Some(lower), None) => Some(max(lower, initial)),
        (None, Some(upper)) => Some(min(upper, initial)),
        (None, None) => None,
    }
}

/// Resolve the viewport `constraints` describe on `device`, with default
/// preferences.
pub fn resolve_viewport(constraints: &TestConstraints, device: &DeviceEnvironment) -> ResolvedViewport {
    resolve_viewport_with_prefs(constraints, device, &Preferences::default())
}

pub fn resolve_viewport_with_prefs(
    constraints: &TestConstraints,
    device: &DeviceEnvironment,
    prefs: &Preferences,
) -> ResolvedViewport {
    let declared = constraints.evaluate(device);

    let target_dpi = declared.target_density_dpi.specified().filter(|dpi| given(*dpi));
    let initial_width = device.available_width(target_dpi).unwrap_or(f64::NAN);
    let initial_height = device.available_height(target_dpi).unwrap_or(f64::NAN);

    // The UA stylesheet is assumed to set width, min-zoom and max-zoom.
    let default_width = device.desktop_width().unwrap_or(f64::NAN);
    let default_min_zoom = device
        .default_min_zoom()
        .filter(|zoom| given(*zoom))
        .unwrap_or(prefs.fallback_min_zoom);
    let default_max_zoom = device
        .default_max_zoom()
        .filter(|zoom| given(*zoom))
        .unwrap_or(prefs.fallback_max_zoom);

    let min_width = declared.min_width.or_default(default_width);
    let max_width = declared.max_width.or_default(default_width);
    let min_height = declared.min_height.specified();
    let max_height = declared.max_height.specified();
    let min_zoom = declared.min_zoom.or_default(default_min_zoom);
    let max_zoom = declared.max_zoom.or_default(default_max_zoom);
    // `zoom: auto` and an absent zoom declaration are treated alike.
    let declared_zoom = match declared.zoom {
        Declared::Specified(zoom) => Some(zoom),
        Declared::Unspecified | Declared::Auto => None,
    };
    debug!(
        "Resolving {initial_width}x{initial_height} (target dpi {target_dpi:?}) with width \
         {min_width:?}..{max_width:?}, height {min_height:?}..{max_height:?}, zoom \
         {declared_zoom:?} in {min_zoom:?}..{max_zoom:?}"
    );

    // Steps 2 and 3
    let width = constrain(min_width, max_width, initial_width);
    let height = constrain(min_height, max_height, initial_height);

    // Step 4
    let max_zoom = match (min_zoom, max_zoom) {
        (Some(min_zoom), Some(max_zoom)) if max_zoom < min_zoom => Some(min_zoom),
        _ => max_zoom,
    };

    // Steps 5 and 6
    let mut zoom = match (declared_zoom, width) {
        (Some(zoom), _) => zoom,
        (None, Some(width)) => initial_width / width,
        (None, None) => 1.,
    };

    // Step 7
    if let (None, Some(height)) = (declared_zoom, height) {
        zoom = max(zoom, initial_height / height);
    }

    // Step 8
    zoom = match (min_zoom, max_zoom) {
        (_, Some(max_zoom)) if zoom > max_zoom => max_zoom,
        (Some(min_zoom), _) if zoom < min_zoom => min_zoom,
        _ => zoom,
    };
    debug!("Constrained width {width:?}, height {height:?}, zoom {zoom}");

    // Steps 9, 10 and 11
    let width = width.unwrap_or_else(|| match (declared_zoom, height) {
        (None, _) => initial_width,
        (Some(_), None) => initial_width / zoom,
        (Some(_), Some(height)) => height * initial_width / initial_height,
    });

    // Step 12
    let height = height.unwrap_or_else(|| width * initial_height / initial_width);

    // Steps 13 and 14: the layout viewport always fills the visual viewport.
    let width = max(width, initial_width / zoom);
    let height = max(height, initial_height / zoom);
    debug!("Resolved viewport {width}x{height} at zoom {zoom}");

    ResolvedViewport {
        size: Size2D::new(width, height),
        initial_zoom: Scale::new(zoom),
        target_dpi,
    }
}

/// Resolve many tests at once. Resolutions are independent, so they run in
/// parallel; the results keep the order of `constraints`.
pub fn resolve_all(
    constraints: &[TestConstraints],
    device: &DeviceEnvironment,
    prefs: &Preferences,
) -> Vec<ResolvedViewport> {
    constraints
        .par_iter()
        .map(|constraints| resolve_viewport_with_prefs(constraints, device, prefs))
        .collect()
}
