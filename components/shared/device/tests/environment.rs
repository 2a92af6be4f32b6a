/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use viewport_device::{DeviceEnvironment, DeviceFacts};

fn phone() -> DeviceEnvironment {
    DeviceEnvironment::from_query(
        "aw=320&ah=480&dw=320&dh=480&dskw=980&dpi=160&dpr=150&em=16&ex=8\
         &minw=1&maxw=10000&minsw=3200&maxsw=32&minzwd=1280&maxzwd=64",
    )
    .unwrap()
}

#[test]
fn test_unscaled_sizes() {
    let device = phone();
    assert_eq!(device.available_width(None), Some(320.));
    assert_eq!(device.available_height(None), Some(480.));
    assert_eq!(device.device_width(None), Some(320.));
    assert_eq!(device.device_height(None), Some(480.));
    assert_eq!(device.desktop_width(), Some(980.));
}

#[test]
fn test_scale_to_dpi() {
    let device = phone();
    // 320 CSS px at 1.5 device px each is 480 device px, rescaled by 120/160.
    assert_eq!(device.scale_to_dpi(320., 120.), Some(360.));
    assert_eq!(device.device_width(Some(120.)), Some(360.));
    assert_eq!(device.available_height(Some(240.)), Some(1080.));
}

#[test]
fn test_scale_to_dpi_needs_ratio_and_resolution() {
    let no_dpi = DeviceEnvironment::from_query("aw=320&dpr=150").unwrap();
    assert_eq!(no_dpi.scale_to_dpi(320., 120.), None);
    assert_eq!(no_dpi.available_width(Some(120.)), None);
    assert_eq!(no_dpi.available_width(None), Some(320.));

    let no_ratio = DeviceEnvironment::from_query("aw=320&dpi=160").unwrap();
    assert_eq!(no_ratio.scale_to_dpi(320., 120.), None);
}

#[test]
fn test_scale_limits_are_derived_from_reference_widths() {
    let device = phone();
    assert_eq!(device.minimum_scale(), Some(0.1));
    assert_eq!(device.maximum_scale(), Some(10.));
    assert_eq!(device.default_min_zoom(), Some(0.25));
    assert_eq!(device.default_max_zoom(), Some(5.));
    assert_eq!(device.minimum_meta_width(), Some(1.));
    assert_eq!(device.maximum_meta_width(), Some(10000.));
}

#[test]
fn test_zero_reference_width_is_unknown() {
    let device = DeviceEnvironment::from_query("aw=320&minsw=0&maxzwd=0").unwrap();
    assert_eq!(device.minimum_scale(), None);
    assert_eq!(device.default_max_zoom(), None);
}

#[test]
fn test_scale_limits_need_available_width() {
    let device = DeviceEnvironment::from_query("minsw=3200").unwrap();
    assert_eq!(device.minimum_scale(), None);
}

#[test]
fn test_unknown_facts() {
    let device = DeviceEnvironment::new(DeviceFacts::default());
    assert_eq!(device.available_width(None), None);
    assert_eq!(device.desktop_width(), None);
    assert_eq!(device.device_pixel_ratio_percent(), None);
    assert_eq!(device.resolution_dpi(), None);
    assert_eq!(device.one_em(), None);
    assert_eq!(device.one_ex(), None);
}

#[test]
fn test_absolute_units() {
    let device = phone();
    assert_eq!(device.one_inch(), 96.);
    assert!((device.one_cm() - 37.795_275_590_551_18).abs() < 1e-9);
    assert!((device.one_mm() - 3.779_527_559_055_118).abs() < 1e-9);
    assert_eq!(device.one_point(), 96. / 72.);
    assert_eq!(device.one_pica(), 16.);
    assert_eq!(device.one_em(), Some(16.));
    assert_eq!(device.one_ex(), Some(8.));
}
