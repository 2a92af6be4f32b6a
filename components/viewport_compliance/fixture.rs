/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Individual compliance tests and the comparison of their expectations with
//! what a browser actually rendered.

use std::fmt;

use log::debug;
use url::Url;
use viewport_device::DeviceEnvironment;

use crate::constraints::TestConstraints;
use crate::prefs::Preferences;
use crate::resolve::resolve_viewport_with_prefs;

/// What a test checks once its page has loaded.
#[derive(Clone, Debug)]
pub enum Expectation {
    /// The page has a `#test-container` whose size reveals the viewport.
    Viewport(TestConstraints),
    /// The page has a `#last-x` element whose position reveals whether text
    /// wrapping to the visual viewport is enabled.
    TextWrap(bool),
}

impl Default for Expectation {
    fn default() -> Self {
        Expectation::Viewport(TestConstraints::default())
    }
}

/// Values measured on a test page after load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measurement {
    Viewport {
        /// `offsetWidth` of the test container.
        width: i32,
        /// `offsetHeight` of the test container.
        height: i32,
        /// `window.innerWidth`.
        inner_width: i32,
    },
    TextWrap {
        /// `offsetTop` of the `#last-x` element.
        last_x_offset_top: i32,
    },
}

/// Where and in which browser the tests are running.
#[derive(Clone, Debug, Default)]
pub struct RunContext {
    /// The tests were loaded from a `file:` URL.
    pub from_file: bool,
    pub user_agent: String,
}

impl RunContext {
    pub fn new(document_url: &Url, user_agent: &str) -> RunContext {
        RunContext {
            from_file: document_url.scheme() == "file",
            user_agent: user_agent.to_owned(),
        }
    }
}

/// The outcome of one test.
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub passed: bool,
    /// Human-readable explanation, listing every mismatched value.
    pub detail: String,
}

impl Verdict {
    fn new(passed: bool) -> Verdict {
        Verdict {
            passed,
            detail: format!("=== {} ===", if passed { "PASS" } else { "FAIL" }),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&self.detail)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ViewportTest {
    /// The test document, relative to the harness.
    pub url: String,
    /// The `content` of the viewport meta tag the page gets, if any.
    pub meta_content: Option<String>,
    /// The declarations of the `@viewport` rule the page gets, if any. When
    /// both are present the meta tag comes first.
    pub css_rules: Option<String>,
    pub description: String,
    pub opera_only: bool,
    /// The test cannot run from `file:`.
    pub server_only: bool,
    /// The mimetype the test document is served with. Informational only.
    pub mimetype: Option<String>,
    pub expectation: Expectation,
}

impl ViewportTest {
    pub fn should_skip(&self, context: &RunContext) -> bool {
        (self.server_only && context.from_file) ||
            (self.opera_only && !context.user_agent.contains("Opera"))
    }

    /// The viewport meta tag written into the test page.
    pub fn meta_tag(&self) -> Option<String> {
        self.meta_content
            .as_ref()
            .map(|content| format!(r#"<meta name="viewport" content="{content}">"#))
    }

    /// The style element holding the test's viewport at-rule.
    pub fn at_rule(&self, prefs: &Preferences) -> Option<String> {
        self.css_rules.as_ref().map(|rules| {
            format!(
                r#"<style type="text/css"> {} {{ {rules} }} </style>"#,
                prefs.at_rule_name()
            )
        })
    }

    /// Compare `measurement` against this test's expectation on `device`.
    pub fn evaluate(
        &self,
        device: &DeviceEnvironment,
        measurement: Measurement,
        prefs: &Preferences,
    ) -> Verdict {
        let verdict = match (&self.expectation, measurement) {
            (Expectation::TextWrap(enabled), Measurement::TextWrap { last_x_offset_top }) => {
                Verdict::new((last_x_offset_top == 0) != *enabled)
            },
            (
                Expectation::Viewport(constraints),
                Measurement::Viewport {
                    width,
                    height,
                    inner_width,
                },
            ) => compare_viewport(constraints, device, width, height, inner_width, prefs),
            _ => Verdict {
                passed: false,
                detail: "=== ERROR ===\nTest markup missing?".to_owned(),
            },
        };
        debug!("{:?}: {}", self.description, verdict.detail);
        verdict
    }
}

fn compare_viewport(
    constraints: &TestConstraints,
    device: &DeviceEnvironment,
    width: i32,
    height: i32,
    inner_width: i32,
    prefs: &Preferences,
) -> Verdict {
    let expected = resolve_viewport_with_prefs(constraints, device, prefs);

    // Measured sizes are whole pixels, so accept either side of a fraction.
    let (min_width, max_width) = (expected.width().floor(), expected.width().ceil());
    let (min_height, max_height) = (expected.height().floor(), expected.height().ceil());
    let zoom = device
        .available_width(expected.target_dpi)
        .unwrap_or(f64::NAN) /
        f64::from(inner_width);

    let width = f64::from(width);
    let height = f64::from(height);
    let pass_width = width >= min_width && width <= max_width;
    let pass_height = height >= min_height && height <= max_height;
    let pass_zoom = (zoom - expected.zoom()).abs() < prefs.zoom_tolerance;

    let mut verdict = Verdict::new(pass_width && pass_height && pass_zoom);
    if !pass_width {
        verdict.detail += &format!(
            "\nExpected width (min/max): {min_width}/{max_width}\nActual width: {width}"
        );
    }
    if !pass_height {
        verdict.detail += &format!(
            "\nExpected height (min/max): {min_height}/{max_height}\nActual height: {height}"
        );
    }
    if !pass_zoom {
        verdict.detail += &format!(
            "\nExpected initial-scale: {} (+/-{})\nActual initial-scale: {zoom}",
            (expected.zoom() * 1000.).round() / 1000.,
            prefs.zoom_tolerance,
        );
    }
    verdict
}
