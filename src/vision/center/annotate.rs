// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crosshair overlay for predicted centers

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

const COORD_LIMIT: i64 = 1 << 24;
const MAX_EXTENT: u32 = 1 << 20;

/// Appearance of the crosshair marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrosshairStyle {
    /// Arm length in pixels on each side of the center
    pub size: u32,
    pub color: Rgb<u8>,
    /// Line thickness in pixels
    pub thickness: u32,
}

impl Default for CrosshairStyle {
    fn default() -> Self {
        Self {
            size: 20,
            color: Rgb([255, 0, 0]),
            thickness: 2,
        }
    }
}

/// Draw a crosshair at `(x, y)` on an RGB copy of `image`
///
/// Grayscale inputs are expanded to RGB with the gray value in every
/// channel. The input is never modified.
pub fn draw_crosshair(image: &DynamicImage, x: f64, y: f64, style: &CrosshairStyle) -> RgbImage {
    let mut canvas = image.to_rgb8();
    draw_crosshair_mut(&mut canvas, x, y, style);
    canvas
}

/// Draw a crosshair in place
///
/// Coordinates are truncated toward zero. Arms that leave the image are
/// clipped.
pub fn draw_crosshair_mut(canvas: &mut RgbImage, x: f64, y: f64, style: &CrosshairStyle) {
    // Far off-canvas points are pulled in just enough to keep rect edges in i32.
    let cx = (x as i64).clamp(-COORD_LIMIT, COORD_LIMIT) as i32;
    let cy = (y as i64).clamp(-COORD_LIMIT, COORD_LIMIT) as i32;

    let size = style.size.min(MAX_EXTENT) as i32;
    let thickness = style.thickness.clamp(1, MAX_EXTENT);
    let half = (thickness / 2) as i32;
    let span = (2 * size + 1) as u32;

    // Horizontal arm
    draw_filled_rect_mut(
        canvas,
        Rect::at(cx - size, cy - half).of_size(span, thickness),
        style.color,
    );

    // Vertical arm
    draw_filled_rect_mut(
        canvas,
        Rect::at(cx - half, cy - size).of_size(thickness, span),
        style.color,
    );
}
