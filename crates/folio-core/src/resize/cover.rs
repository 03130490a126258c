use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, JPEG_DATA_URL_PREFIX, JPEG_QUALITY};
use crate::error::{FolioError, Result};

/// Canvas size and encoder quality for resized portfolio images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeOptions {
    pub width: u32,
    pub height: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            quality: JPEG_QUALITY,
        }
    }
}

/// Where a source image lands on the canvas when cover-fitted.
///
/// `x`/`y` are negative when the scaled image overflows the canvas on
/// that axis; the overflow is cropped evenly from both sides. `crop` is
/// the matching rectangle of the source that stays visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverPlacement {
    pub scale: f64,
    pub width: u32,
    pub height: u32,
    pub x: i64,
    pub y: i64,
    pub crop: SourceCrop,
}

/// Visible part of the source image, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Cover fit: scale = max(cw/iw, ch/ih), centred.
pub fn cover_placement(
    src_w: u32,
    src_h: u32,
    canvas_w: u32,
    canvas_h: u32,
) -> Result<CoverPlacement> {
    if src_w == 0 || src_h == 0 {
        return Err(FolioError::InvalidDimensions {
            width: src_w,
            height: src_h,
        });
    }
    if canvas_w == 0 || canvas_h == 0 {
        return Err(FolioError::InvalidDimensions {
            width: canvas_w,
            height: canvas_h,
        });
    }

    let scale = f64::max(
        canvas_w as f64 / src_w as f64,
        canvas_h as f64 / src_h as f64,
    );
    let width = (src_w as f64 * scale).round().max(1.0) as u32;
    let height = (src_h as f64 * scale).round().max(1.0) as u32;

    let crop_w = ((canvas_w as f64 / scale).round() as u32).clamp(1, src_w);
    let crop_h = ((canvas_h as f64 / scale).round() as u32).clamp(1, src_h);

    Ok(CoverPlacement {
        scale,
        width,
        height,
        x: (canvas_w as i64 - width as i64) / 2,
        y: (canvas_h as i64 - height as i64) / 2,
        crop: SourceCrop {
            x: (src_w - crop_w) / 2,
            y: (src_h - crop_h) / 2,
            width: crop_w,
            height: crop_h,
        },
    })
}

/// Draw `img` cover-fitted onto a white canvas.
///
/// Only the visible source rectangle is resampled, so the working buffer
/// never exceeds the canvas whatever the source aspect ratio.
pub fn draw_cover(img: &DynamicImage, options: &ResizeOptions) -> Result<RgbImage> {
    let placement = cover_placement(img.width(), img.height(), options.width, options.height)?;
    let crop = placement.crop;
    let visible = img
        .crop_imm(crop.x, crop.y, crop.width, crop.height)
        .resize_exact(options.width, options.height, FilterType::CatmullRom)
        .to_rgba8();

    let mut canvas = RgbaImage::from_pixel(options.width, options.height, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &visible, 0, 0);

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

/// Encode a canvas as a `data:image/jpeg;base64,` URL.
pub fn encode_jpeg_data_url(canvas: &RgbImage, quality: u8) -> Result<String> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder.encode_image(canvas)?;
    Ok(format!("{JPEG_DATA_URL_PREFIX}{}", STANDARD.encode(&buf)))
}

/// Decode image bytes, cover-fit them onto the canvas and encode as a data URL.
pub fn resize_to_data_url(bytes: &[u8], options: &ResizeOptions) -> Result<String> {
    let img = image::load_from_memory(bytes)?;
    let canvas = draw_cover(&img, options)?;
    encode_jpeg_data_url(&canvas, options.quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn exact_aspect_fills_canvas() {
        let p = cover_placement(400, 300, 800, 600).unwrap();
        assert_eq!((p.width, p.height, p.x, p.y), (800, 600, 0, 0));
        assert_abs_diff_eq!(p.scale, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn wide_image_is_cropped_horizontally() {
        let p = cover_placement(1600, 600, 800, 600).unwrap();
        assert_eq!((p.width, p.height, p.x, p.y), (1600, 600, -400, 0));
        assert_eq!(
            p.crop,
            SourceCrop {
                x: 400,
                y: 0,
                width: 800,
                height: 600
            }
        );
        assert_abs_diff_eq!(p.scale, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn square_image_is_cropped_vertically() {
        let p = cover_placement(100, 100, 800, 600).unwrap();
        assert_eq!((p.width, p.height, p.x, p.y), (800, 800, 0, -100));
    }

    #[test]
    fn sliver_crops_before_scaling() {
        let p = cover_placement(1, 2000, 800, 600).unwrap();
        assert_eq!(p.height, 1_600_000);
        assert_eq!(
            p.crop,
            SourceCrop {
                x: 0,
                y: 999,
                width: 1,
                height: 1
            }
        );
    }

    #[test]
    fn tall_sliver_fills_canvas() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1000, image::Rgb([10, 20, 30])));
        let canvas = draw_cover(&img, &ResizeOptions::default()).unwrap();
        assert_eq!(canvas.dimensions(), (800, 600));
        for (x, y) in [(0, 0), (400, 300), (799, 599)] {
            let px = canvas.get_pixel(x, y).0;
            for (got, want) in px.iter().zip([10u8, 20, 30]) {
                assert!(got.abs_diff(want) <= 1, "pixel ({x},{y}) = {px:?}");
            }
        }
    }

    #[test]
    fn zero_sized_source_is_rejected() {
        assert!(matches!(
            cover_placement(0, 10, 800, 600),
            Err(FolioError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn transparent_pixels_become_white() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 3, Rgba([0, 0, 0, 0])));
        let canvas = draw_cover(&img, &ResizeOptions::default()).unwrap();
        assert_eq!(canvas.dimensions(), (800, 600));
        assert_eq!(canvas.get_pixel(400, 300).0, [255, 255, 255]);
    }
}
