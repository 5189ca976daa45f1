use super::calculator::IndexRaster;
use anyhow::Result;
use image::{ImageBuffer, ImageEncoder, Rgba, RgbaImage, codecs::png::PngEncoder};

/// Fixed display range. Index values outside it are clamped for rendering
/// only; the health score always uses the unclamped values.
pub const DISPLAY_MIN: f64 = 0.1;
pub const DISPLAY_MAX: f64 = 0.8;

// Diverging red -> yellow -> green ramp over the normalised display range
const COLOR_STOPS: [(f32, Rgba<u8>); 5] = [
    (0.0, Rgba([165, 0, 38, 255])),
    (0.25, Rgba([244, 109, 67, 255])),
    (0.5, Rgba([254, 224, 139, 255])),
    (0.75, Rgba([102, 189, 99, 255])),
    (1.0, Rgba([0, 104, 55, 255])),
];

/// Returns an interpolated colour based on a value and a set of colour stops.
pub fn get_color(value: f32, color_stops: &[(f32, Rgba<u8>)]) -> Rgba<u8> {
    for window in color_stops.windows(2) {
        let (v1, c1) = window[0];
        let (v2, c2) = window[1];

        if value <= v1 {
            return c1;
        }
        if value <= v2 {
            let t = (value - v1) / (v2 - v1);
            return Rgba([
                (c1.0[0] as f32 * (1.0 - t) + c2.0[0] as f32 * t) as u8,
                (c1.0[1] as f32 * (1.0 - t) + c2.0[1] as f32 * t) as u8,
                (c1.0[2] as f32 * (1.0 - t) + c2.0[2] as f32 * t) as u8,
                (c1.0[3] as f32 * (1.0 - t) + c2.0[3] as f32 * t) as u8,
            ]);
        }
    }
    color_stops
        .last()
        .map(|(_, c)| *c)
        .unwrap_or(Rgba([0, 0, 0, 255]))
}

/// Renders the index raster as a colour-mapped RGBA PNG. Undefined cells
/// come out fully transparent.
pub fn render_index_png(index: &IndexRaster) -> Result<Vec<u8>> {
    let (width, height) = (index.width() as u32, index.height() as u32);
    let img: RgbaImage = ImageBuffer::from_fn(width, height, |x, y| {
        match index.value_at(x as usize, y as usize) {
            None => Rgba([0, 0, 0, 0]),
            Some(v) => {
                let clamped = v.clamp(DISPLAY_MIN, DISPLAY_MAX);
                let t = ((clamped - DISPLAY_MIN) / (DISPLAY_MAX - DISPLAY_MIN)) as f32;
                get_color(t, &COLOR_STOPS)
            }
        }
    });

    let mut png_data = Vec::new();
    {
        let encoder = PngEncoder::new(&mut png_data);
        encoder
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                image::ColorType::Rgba8.into(),
            )
            .map_err(|e| anyhow::anyhow!("PNG encoding error: {e:?}"))?;
    }
    Ok(png_data)
}
