/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use viewport_device::{DeviceFacts, FactsError};

#[test]
fn test_query_parsing_ignores_harness_keys() {
    let facts = DeviceFacts::from_query("?idx=3&res=110&mode=0&aw=320&ah=480&dpr=200").unwrap();
    assert_eq!(facts.available_width, Some(320.));
    assert_eq!(facts.available_height, Some(480.));
    assert_eq!(facts.device_pixel_ratio, Some(200.));
    assert_eq!(facts.device_width, None);
}

#[test]
fn test_query_round_trip() {
    let facts = DeviceFacts {
        available_width: Some(320.),
        available_height: Some(480.),
        em_size: Some(16.),
        ex_size: Some(7.5),
        resolution_dpi: Some(100.9),
        ..Default::default()
    };
    let query = facts.to_query();
    assert!(query.starts_with("aw=320&ah=480&dw=-1&dh=-1&dskw=-1&dpi=100.9&dpr=-1&em=16&ex=7.5"));
    assert!(query.ends_with("&maxzwd=-1"));
    assert_eq!(DeviceFacts::from_query(&query).unwrap(), facts);
}

#[test]
fn test_invalid_value() {
    match DeviceFacts::from_query("aw=320&dpi=high") {
        Err(FactsError::InvalidValue { name, value }) => {
            assert_eq!(name, "dpi");
            assert_eq!(value, "high");
        },
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_invalid_value_of_unrelated_key_is_ignored() {
    assert!(DeviceFacts::from_query("mode=single&aw=1").is_ok());
}

#[test]
fn test_json_facts() {
    let facts = DeviceFacts::from_json(r#"{ "aw": 360, "ah": 640, "dpi": -1, "dskw": null }"#).unwrap();
    assert_eq!(facts.available_width, Some(360.));
    assert_eq!(facts.available_height, Some(640.));
    assert_eq!(facts.resolution_dpi, None);
    assert_eq!(facts.desktop_width, None);
    assert_eq!(facts.em_size, None);

    assert!(matches!(DeviceFacts::from_json("{ \"aw\": "), Err(FactsError::Json(_))));
}

#[test]
fn test_unknown_keys() {
    let facts = DeviceFacts::from_query("aw=320&ah=480").unwrap();
    let unknown: Vec<_> = facts.unknown_keys().collect();
    assert_eq!(unknown.len(), DeviceFacts::KEYS.len() - 2);
    assert!(!unknown.contains(&"aw"));
    assert!(unknown.contains(&"dskw"));
}
