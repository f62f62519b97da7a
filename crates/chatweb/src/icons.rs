//! Icon decoding, resizing and the built-in chat glyphs.

use crate::{AppError, AppResult};

use chatweb_core::{IconRequest, IconSource, IconVariant};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use image::{Rgba, RgbaImage, imageops::FilterType};
use tracing::{debug, warn};

/// Edge length of built-in icons when no size is requested.
pub const BUILT_IN_SIZE: u32 = 64;

const BUBBLE: Rgba<u8> = Rgba([47, 129, 247, 255]);
const GLYPH: Rgba<u8> = Rgba([255, 255, 255, 255]);
const DOT: Rgba<u8> = Rgba([230, 60, 50, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Decode the first candidate of `request` that loads.
///
/// Built-in candidates always load, so this only falls through to the idle
/// glyph when a request carries nothing but broken files.
pub fn load(request: &IconRequest) -> RgbaImage {
    for candidate in &request.candidates {
        match candidate {
            IconSource::File(path) => match load_file(path) {
                Ok(image) => return fit(image, request.size),
                Err(e) => warn!(path = ?path, error = %e, "Icon override unusable, falling back"),
            },
            IconSource::BuiltIn(variant) => {
                return built_in(*variant, request.size.unwrap_or(BUILT_IN_SIZE));
            }
        }
    }
    built_in(IconVariant::Idle, request.size.unwrap_or(BUILT_IN_SIZE))
}

#[track_caller]
fn load_file(path: &Path) -> AppResult<RgbaImage> {
    if !path.exists() {
        return Err(AppError::Icon {
            reason: format!("{} does not exist", path.display()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let image = image::open(path).map_err(|e| AppError::Icon {
        reason: format!("Failed to decode {}: {}", path.display(), e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    debug!(path = ?path, "Icon override loaded");
    Ok(image.into_rgba8())
}

fn fit(image: RgbaImage, size: Option<u32>) -> RgbaImage {
    match size {
        Some(size) if image.width() != size || image.height() != size => {
            image::imageops::resize(&image, size, size, FilterType::Lanczos3)
        }
        _ => image,
    }
}

/// Draw the built-in speech bubble. The notify variant adds a dot in the
/// top-right corner.
pub fn built_in(variant: IconVariant, size: u32) -> RgbaImage {
    let size = size.max(8);
    let s = size as f32;
    let center = (s / 2.0, s * 0.45);
    let radius = s * 0.4;
    let dot_radius = s * 0.06;
    let badge_radius = s * 0.18;
    let badge_center = (s - badge_radius - 1.0, badge_radius + 1.0);

    let mut image = RgbaImage::from_pixel(size, size, CLEAR);

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

        let in_bubble = distance((px, py), center) <= radius;
        // Tail below the bubble, leaning left.
        let in_tail = py >= center.1
            && py <= s * 0.95
            && px >= s * 0.22
            && px <= s * 0.22 + (s * 0.95 - py) * 0.8;

        if in_bubble || in_tail {
            *pixel = BUBBLE;
        }

        for offset in [-0.18, 0.0, 0.18] {
            if distance((px, py), (center.0 + s * offset, center.1)) <= dot_radius {
                *pixel = GLYPH;
            }
        }

        if variant == IconVariant::Notify && distance((px, py), badge_center) <= badge_radius {
            *pixel = DOT;
        }
    }

    image
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Tray icon for `request`.
#[track_caller]
pub fn tray_icon(request: &IconRequest) -> AppResult<tray_icon::Icon> {
    let image = load(request);
    let (width, height) = image.dimensions();
    tray_icon::Icon::from_rgba(image.into_raw(), width, height).map_err(|e| AppError::Icon {
        reason: format!("Failed to create tray icon from RGBA: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Menu item icon for `request`.
#[track_caller]
pub fn menu_icon(request: &IconRequest) -> AppResult<tray_icon::menu::Icon> {
    let image = load(request);
    let (width, height) = image.dimensions();
    tray_icon::menu::Icon::from_rgba(image.into_raw(), width, height).map_err(|e| {
        AppError::Icon {
            reason: format!("Failed to create menu icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        }
    })
}

/// Window icon for `request`.
#[track_caller]
pub fn window_icon(request: &IconRequest) -> AppResult<tao::window::Icon> {
    let image = load(request);
    let (width, height) = image.dimensions();
    tao::window::Icon::from_rgba(image.into_raw(), width, height).map_err(|e| AppError::Icon {
        reason: format!("Failed to create window icon from RGBA: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}
