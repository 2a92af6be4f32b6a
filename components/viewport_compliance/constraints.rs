/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The descriptor values a test expects the page to declare.

use std::fmt;
use std::sync::Arc;

use viewport_device::DeviceEnvironment;

/// The computed value of a single `@viewport` descriptor.
///
/// `Unspecified` and `Auto` behave differently: an unspecified `min-width`,
/// `max-width`, `min-zoom` or `max-zoom` falls back to the UA stylesheet,
/// while `auto` removes the bound altogether.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Declared<T> {
    /// The descriptor was not declared.
    #[default]
    Unspecified,
    /// The descriptor was explicitly set to `auto`.
    Auto,
    Specified(T),
}

impl<T> Declared<T> {
    pub fn specified(self) -> Option<T> {
        match self {
            Declared::Specified(value) => Some(value),
            Declared::Unspecified | Declared::Auto => None,
        }
    }

    /// The bound this descriptor imposes once the UA default has been applied
    /// to an unspecified value. `None` means unbounded.
    pub fn or_default(self, default: T) -> Option<T> {
        match self {
            Declared::Unspecified => Some(default),
            Declared::Auto => None,
            Declared::Specified(value) => Some(value),
        }
    }
}

impl Declared<f64> {
    /// A length computed from a device fact. An unknown fact yields NaN
    /// rather than an unspecified value, so that a missing measurement can
    /// never be mistaken for an absent declaration.
    pub fn from_fact(fact: Option<f64>) -> Declared<f64> {
        Declared::Specified(fact.unwrap_or(f64::NAN))
    }
}

impl From<f64> for Declared<f64> {
    fn from(value: f64) -> Self {
        Declared::Specified(value)
    }
}

type DeriveFn<T> = dyn Fn(&DeviceEnvironment) -> Declared<T> + Send + Sync;

/// An expected descriptor value, either given literally or computed from the
/// device, e.g. `width: device-width` or `width: 50em`.
pub enum Expected<T> {
    Literal(Declared<T>),
    Derived(Arc<DeriveFn<T>>),
}

impl Expected<f64> {
    pub const UNSPECIFIED: Self = Expected::Literal(Declared::Unspecified);
    pub const AUTO: Self = Expected::Literal(Declared::Auto);
}

impl<T> Expected<T> {
    pub fn derived<F>(derive: F) -> Self
    where
        F: Fn(&DeviceEnvironment) -> Declared<T> + Send + Sync + 'static,
    {
        Expected::Derived(Arc::new(derive))
    }
}

impl<T: Copy> Expected<T> {
    pub fn evaluate(&self, device: &DeviceEnvironment) -> Declared<T> {
        match self {
            Expected::Literal(value) => *value,
            Expected::Derived(derive) => derive(device),
        }
    }
}

impl<T> Default for Expected<T> {
    fn default() -> Self {
        Expected::Literal(Declared::Unspecified)
    }
}

impl<T: Clone> Clone for Expected<T> {
    fn clone(&self) -> Self {
        match self {
            Expected::Literal(value) => Expected::Literal(value.clone()),
            Expected::Derived(derive) => Expected::Derived(derive.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Expected<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expected::Literal(value) => formatter.debug_tuple("Literal").field(value).finish(),
            Expected::Derived(_) => formatter.write_str("Derived(..)"),
        }
    }
}

impl From<f64> for Expected<f64> {
    fn from(value: f64) -> Self {
        Expected::Literal(Declared::Specified(value))
    }
}

impl<T> From<Declared<T>> for Expected<T> {
    fn from(value: Declared<T>) -> Self {
        Expected::Literal(value)
    }
}

/// The computed descriptors one test expects, assuming no UA stylesheet.
#[derive(Clone, Debug, Default)]
pub struct TestConstraints {
    pub min_width: Expected<f64>,
    pub max_width: Expected<f64>,
    pub min_height: Expected<f64>,
    pub max_height: Expected<f64>,
    /// The initial zoom, as a scale factor (1 is 100%).
    pub zoom: Expected<f64>,
    pub min_zoom: Expected<f64>,
    pub max_zoom: Expected<f64>,
    /// The reference density for `target-densitydpi`. `Unspecified` and
    /// `Auto` both mean the device's own density.
    pub target_density_dpi: Expected<f64>,
}

impl TestConstraints {
    /// Sets `min-width` and `max-width` to the same value, as the `width`
    /// shorthand does.
    pub fn with_width(mut self, width: impl Into<Expected<f64>>) -> Self {
        self.min_width = width.into();
        self.max_width = self.min_width.clone();
        self
    }

    /// Sets `min-height` and `max-height` to the same value.
    pub fn with_height(mut self, height: impl Into<Expected<f64>>) -> Self {
        self.min_height = height.into();
        self.max_height = self.min_height.clone();
        self
    }

    /// Evaluates every derived descriptor against `device`.
    pub(crate) fn evaluate(&self, device: &DeviceEnvironment) -> EvaluatedConstraints {
        EvaluatedConstraints {
            min_width: self.min_width.evaluate(device),
            max_width: self.max_width.evaluate(device),
            min_height: self.min_height.evaluate(device),
            max_height: self.max_height.evaluate(device),
            zoom: self.zoom.evaluate(device),
            min_zoom: self.min_zoom.evaluate(device),
            max_zoom: self.max_zoom.evaluate(device),
            target_density_dpi: self.target_density_dpi.evaluate(device),
        }
    }
}

/// [`TestConstraints`] with no derived values left.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EvaluatedConstraints {
    pub min_width: Declared<f64>,
    pub max_width: Declared<f64>,
    pub min_height: Declared<f64>,
    pub max_height: Declared<f64>,
    pub zoom: Declared<f64>,
    pub min_zoom: Declared<f64>,
    pub max_zoom: Declared<f64>,
    pub target_density_dpi: Declared<f64>,
}
