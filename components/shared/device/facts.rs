/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The flat map of measured device facts.
//!
//! Facts are carried between page loads of the harness in the query part of
//! the URL, keyed by short names (`aw`, `dpi`, ...). A fact that has not been
//! measured yet is written as `-1`, and any negative value reads back as
//! unknown.

use std::fmt;

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use url::form_urlencoded;

/// Errors produced while reading a set of device facts.
#[derive(Debug)]
pub enum FactsError {
    /// A recognised fact carried a value that is not a number.
    InvalidValue { name: String, value: String },
    /// A JSON fact map could not be deserialized.
    Json(serde_json::Error),
}

impl fmt::Display for FactsError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FactsError::InvalidValue { name, value } => {
                write!(formatter, "Invalid value for device fact `{name}`: {value:?}")
            },
            FactsError::Json(error) => write!(formatter, "Malformed device fact map: {error}"),
        }
    }
}

impl std::error::Error for FactsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FactsError::InvalidValue { .. } => None,
            FactsError::Json(error) => Some(error),
        }
    }
}

impl From<serde_json::Error> for FactsError {
    fn from(error: serde_json::Error) -> Self {
        FactsError::Json(error)
    }
}

/// Maps a raw measurement onto a fact, treating negative values as unknown.
#[inline]
pub(crate) fn known(value: f64) -> Option<f64> {
    if value >= 0. { Some(value) } else { None }
}

fn deserialize_fact<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.and_then(known))
}

macro_rules! declare_device_facts {
    ( $( $(#[$doc:meta])* $field:ident => $key:literal, )+ ) => {
        /// Every environment fact the viewport tests depend on. `None` means the
        /// fact has not been measured.
        #[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
        pub struct DeviceFacts {
            $(
                $(#[$doc])*
                #[serde(rename = $key, default, deserialize_with = "deserialize_fact")]
                pub $field: Option<f64>,
            )+
        }

        impl DeviceFacts {
            /// The query keys of every fact, in serialization order.
            pub const KEYS: &'static [&'static str] = &[ $( $key, )+ ];

            fn slot_mut(&mut self, key: &str) -> Option<&mut Option<f64>> {
                match key {
                    $( $key => Some(&mut self.$field), )+
                    _ => None,
                }
            }

            /// Every fact paired with its query key.
            pub fn entries(&self) -> Vec<(&'static str, Option<f64>)> {
                vec![ $( ($key, self.$field), )+ ]
            }
        }
    };
}

declare_device_facts! {
    /// Layout viewport width at `initial-scale=1`.
    available_width => "aw",
    /// Layout viewport height at `initial-scale=1`.
    available_height => "ah",
    /// Device width in CSS px.
    device_width => "dw",
    /// Device height in CSS px.
    device_height => "dh",
    /// Viewport width the UA stylesheet gives non-mobile pages.
    desktop_width => "dskw",
    /// Native resolution in dots per inch.
    resolution_dpi => "dpi",
    /// Device px per CSS px, times 100.
    device_pixel_ratio => "dpr",
    em_size => "em",
    ex_size => "ex",
    /// Viewport width resulting from `width=1` in a meta tag.
    min_meta_width => "minw",
    /// Viewport width resulting from `width=20000` in a meta tag.
    max_meta_width => "maxw",
    /// Viewport width resulting from `initial-scale=0.01` with open scale limits.
    min_scale_ref_width => "minsw",
    /// Viewport width resulting from `initial-scale=100` with open scale limits.
    max_scale_ref_width => "maxsw",
    /// Viewport width resulting from `initial-scale=0.01` under the default limits.
    default_min_zoom_ref_width => "minzwd",
    /// Viewport width resulting from `initial-scale=100` under the default limits.
    default_max_zoom_ref_width => "maxzwd",
}

impl DeviceFacts {
    /// Parse the facts out of a URL query string, with or without the leading
    /// `?`. Keys that are not facts are ignored, since the harness shares the
    /// query with its own bookkeeping.
    pub fn from_query(query: &str) -> Result<DeviceFacts, FactsError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut facts = DeviceFacts::default();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            let Some(slot) = facts.slot_mut(&name) else {
                continue;
            };
            let parsed = value.trim().parse::<f64>().map_err(|_| {
                warn!("Unparsable device fact {name}={value}");
                FactsError::InvalidValue {
                    name: name.to_string(),
                    value: value.to_string(),
                }
            })?;
            *slot = known(parsed);
        }
        Ok(facts)
    }

    /// Serialize every fact into a query string (without the leading `?`),
    /// writing `-1` for facts that are still unknown.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.entries() {
            match value {
                Some(value) => serializer.append_pair(key, &value.to_string()),
                None => serializer.append_pair(key, "-1"),
            };
        }
        serializer.finish()
    }

    /// Read a fact map from JSON, keyed the same way as the query string.
    pub fn from_json(json: &str) -> Result<DeviceFacts, FactsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The keys of every fact that is still unknown.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| key)
    }
}
