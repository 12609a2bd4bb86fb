// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Crosshair annotation through the public API

use center_finder::vision::{
    decode_data_uri, draw_crosshair, encode_png_data_uri, CrosshairStyle,
};
use image::{DynamicImage, Rgb};

use crate::common::gray_image;

#[test]
fn test_annotated_png_round_trips() {
    let image = DynamicImage::ImageLuma8(gray_image(120, 90));
    let annotated = draw_crosshair(&image, 60.4, 45.9, &CrosshairStyle::default());

    let uri = encode_png_data_uri(&annotated).unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));

    let (decoded, info) = decode_data_uri(&uri).unwrap();
    assert_eq!((info.width, info.height), (120, 90));
    assert_eq!(decoded.to_rgb8(), annotated);
}

#[test]
fn test_custom_style() {
    let image = DynamicImage::ImageLuma8(gray_image(60, 60));
    let style = CrosshairStyle {
        size: 5,
        color: Rgb([0, 255, 0]),
        thickness: 1,
    };
    let annotated = draw_crosshair(&image, 30.0, 30.0, &style);

    assert_eq!(annotated.get_pixel(25, 30), &Rgb([0, 255, 0]));
    assert_eq!(annotated.get_pixel(30, 35), &Rgb([0, 255, 0]));
    assert_ne!(annotated.get_pixel(24, 30), &Rgb([0, 255, 0]));
    assert_ne!(annotated.get_pixel(30, 36), &Rgb([0, 255, 0]));
}

#[test]
fn test_preserves_untouched_pixels() {
    let source = gray_image(40, 40);
    let annotated = draw_crosshair(
        &DynamicImage::ImageLuma8(source.clone()),
        20.0,
        20.0,
        &CrosshairStyle::default(),
    );

    let value = source.get_pixel(2, 3)[0];
    assert_eq!(annotated.get_pixel(2, 3), &Rgb([value, value, value]));
}
