//! Image enhancement for OCR.

use image::{imageops::FilterType, DynamicImage, GenericImageView, GrayImage, Luma};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::filter::median_filter;
use tracing::debug;

use crate::models::config::EnhanceConfig;

/// Normalizes a raw page image into a binarized, denoised image tuned for
/// the OCR engine.
///
/// The steps run in a fixed order with fixed constants; every step is a
/// total function, so enhancement has no failure path.
pub struct ImageEnhancer {
    config: EnhanceConfig,
}

impl ImageEnhancer {
    /// Create an enhancer with the default tuned constants.
    pub fn new() -> Self {
        Self {
            config: EnhanceConfig::default(),
        }
    }

    /// Create an enhancer from explicit configuration.
    pub fn with_config(config: EnhanceConfig) -> Self {
        Self { config }
    }

    /// Run the full enhancement pipeline on one page image.
    ///
    /// Upscale, grayscale, median denoise, CLAHE, Otsu binarization, and a
    /// small morphological closing to fill gaps in character strokes.
    pub fn enhance(&self, image: &DynamicImage) -> GrayImage {
        let upscaled = self.upscale(image);
        let gray = upscaled.to_luma8();

        let radius = self.config.median_kernel.max(1) / 2;
        let denoised = median_filter(&gray, radius, radius);

        let equalized = self.equalize_local_contrast(&denoised);

        let level = otsu_level(&equalized);
        let binary = threshold(&equalized, level, ThresholdType::Binary);
        debug!("Otsu threshold level: {}", level);

        self.close(&binary)
    }

    /// Upscale pages narrower than the configured minimum width.
    ///
    /// Cubic interpolation, aspect ratio preserved; wider pages pass
    /// through untouched.
    fn upscale(&self, image: &DynamicImage) -> DynamicImage {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 || width >= self.config.min_width {
            return image.clone();
        }

        let scale = self.config.min_width as f32 / width as f32;
        let new_height = ((height as f32 * scale).round() as u32).max(1);
        debug!(
            "Upscaling page {}x{} -> {}x{}",
            width, height, self.config.min_width, new_height
        );

        image.resize_exact(self.config.min_width, new_height, FilterType::CatmullRom)
    }

    /// Contrast-limited adaptive histogram equalization.
    ///
    /// The image is divided into a fixed tile grid; each tile gets a
    /// clipped-histogram mapping and pixels interpolate bilinearly between
    /// the four surrounding tile mappings.
    fn equalize_local_contrast(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return image.clone();
        }

        let grid = self.config.clahe_grid.max(1);
        let tile_w = width.div_ceil(grid).max(1);
        let tile_h = height.div_ceil(grid).max(1);
        let nx = width.div_ceil(tile_w) as usize;
        let ny = height.div_ceil(tile_h) as usize;

        let mut luts = vec![[0u8; 256]; nx * ny];
        for ty in 0..ny {
            for tx in 0..nx {
                let x0 = tx as u32 * tile_w;
                let y0 = ty as u32 * tile_h;
                let x1 = (x0 + tile_w).min(width);
                let y1 = (y0 + tile_h).min(height);

                let mut hist = [0u32; 256];
                for y in y0..y1 {
                    for x in x0..x1 {
                        hist[image.get_pixel(x, y)[0] as usize] += 1;
                    }
                }
                let pixels = (x1 - x0) * (y1 - y0);

                // Clip each bin and hand the excess back uniformly.
                let limit = ((self.config.clahe_clip_limit * pixels as f32 / 256.0).ceil()
                    as u32)
                    .max(1);
                let mut excess = 0u32;
                for bin in hist.iter_mut() {
                    if *bin > limit {
                        excess += *bin - limit;
                        *bin = limit;
                    }
                }
                let bonus = excess / 256;
                for bin in hist.iter_mut() {
                    *bin += bonus;
                }

                let lut = &mut luts[ty * nx + tx];
                let scale = 255.0 / pixels as f32;
                let mut cdf = 0u32;
                for (value, bin) in hist.iter().enumerate() {
                    cdf += *bin;
                    lut[value] = (cdf as f32 * scale).round().min(255.0) as u8;
                }
            }
        }

        let mut result = GrayImage::new(width, height);
        for y in 0..height {
            let (ty0, ty1, fy) = interpolation_span(y, tile_h, ny);
            for x in 0..width {
                let (tx0, tx1, fx) = interpolation_span(x, tile_w, nx);
                let value = image.get_pixel(x, y)[0] as usize;

                let top = luts[ty0 * nx + tx0][value] as f32 * (1.0 - fx)
                    + luts[ty0 * nx + tx1][value] as f32 * fx;
                let bottom = luts[ty1 * nx + tx0][value] as f32 * (1.0 - fx)
                    + luts[ty1 * nx + tx1][value] as f32 * fx;
                let mapped = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0);

                result.put_pixel(x, y, Luma([mapped as u8]));
            }
        }

        result
    }

    /// Morphological closing: dilate then erode with the configured
    /// structuring element.
    fn close(&self, image: &GrayImage) -> GrayImage {
        let k = self.config.closing_kernel.max(1);
        let dilated = morph_scan(image, k, true);
        morph_scan(&dilated, k, false)
    }
}

impl Default for ImageEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tile indices and blend factor for one pixel coordinate.
fn interpolation_span(coord: u32, tile_size: u32, tiles: usize) -> (usize, usize, f32) {
    let pos = (coord as f32 + 0.5) / tile_size as f32 - 0.5;
    if pos <= 0.0 {
        return (0, 0, 0.0);
    }

    let lower = pos.floor() as usize;
    if lower >= tiles - 1 {
        return (tiles - 1, tiles - 1, 0.0);
    }

    (lower, lower + 1, pos - pos.floor())
}

/// k x k window extreme: maximum when `dilate`, minimum otherwise.
/// Borders replicate the edge pixel.
fn morph_scan(image: &GrayImage, k: u32, dilate: bool) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut result = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut extreme = image.get_pixel(x, y)[0];
            for dy in 0..k {
                for dx in 0..k {
                    let sx = (x + dx).min(width.saturating_sub(1));
                    let sy = (y + dy).min(height.saturating_sub(1));
                    let value = image.get_pixel(sx, sy)[0];
                    extreme = if dilate {
                        extreme.max(value)
                    } else {
                        extreme.min(value)
                    };
                }
            }
            result.put_pixel(x, y, Luma([extreme]));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_page(width: u32, height: u32) -> DynamicImage {
        let gray = GrayImage::from_fn(width, height, |x, y| {
            Luma([((x + y) % 256) as u8])
        });
        DynamicImage::ImageLuma8(gray)
    }

    #[test]
    fn test_narrow_page_is_upscaled_to_min_width() {
        let enhancer = ImageEnhancer::new();
        let enhanced = enhancer.enhance(&gradient_page(600, 400));

        assert_eq!(enhanced.width(), 1800);
        // Aspect ratio preserved within rounding.
        assert_eq!(enhanced.height(), 1200);
    }

    #[test]
    fn test_wide_page_keeps_dimensions() {
        let enhancer = ImageEnhancer::new();
        let enhanced = enhancer.enhance(&gradient_page(2000, 100));

        assert_eq!(enhanced.width(), 2000);
        assert_eq!(enhanced.height(), 100);
    }

    #[test]
    fn test_output_is_binary() {
        let enhancer = ImageEnhancer::new();
        let enhanced = enhancer.enhance(&gradient_page(1900, 120));

        assert!(enhanced.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_flat_page_does_not_panic() {
        let gray = GrayImage::from_pixel(1850, 64, Luma([180]));
        let enhancer = ImageEnhancer::new();
        let enhanced = enhancer.enhance(&DynamicImage::ImageLuma8(gray));

        assert_eq!(enhanced.dimensions(), (1850, 64));
        assert!(enhanced.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_closing_fills_single_pixel_gap() {
        // A white field with one black pixel; a 2x2 closing removes it.
        let mut gray = GrayImage::from_pixel(16, 16, Luma([255]));
        gray.put_pixel(8, 8, Luma([0]));

        let enhancer = ImageEnhancer::new();
        let closed = enhancer.close(&gray);

        assert!(closed.pixels().all(|p| p[0] == 255));
    }
}
