/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Expected values for the viewport compliance tests.
//!
//! A test declares the computed `@viewport` descriptors it expects the page's
//! viewport meta tag or at-rule to produce. [`resolve_viewport`] runs those
//! descriptors through the constraining procedure of
//! [CSS Device Adaptation](https://drafts.csswg.org/css-device-adapt/#constraining-procedure)
//! to obtain the width, height and initial zoom the page should be laid out
//! with, which the harness then compares against what it measured.

#![deny(unsafe_code)]

mod constraints;
mod fixture;
mod prefs;
mod resolve;
mod results;

pub use viewport_device::{DeviceEnvironment, DeviceFacts};

pub use crate::constraints::{Declared, Expected, TestConstraints};
pub use crate::fixture::{Expectation, Measurement, RunContext, Verdict, ViewportTest};
pub use crate::prefs::{Preferences, PrefsError};
pub use crate::resolve::{
    ResolvedViewport, resolve_all, resolve_viewport, resolve_viewport_with_prefs,
};
pub use crate::results::{ResultLog, ResultLogError, Summary, TestRange, TestStatus};
