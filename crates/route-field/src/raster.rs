//! Decoding raster images into cost fields.
//!
//! A single luminance channel is read as elevation alone. Four channels are
//! read as elevation (R), friction (G) and a wind vector (B, A). Integer
//! encodings are normalized to `[0, 1]` and their wind channels re-centered
//! to `[-1, 1]`; float encodings are taken as they are.
//!
//! OpenEXR files are read by channel name: `Y` alone is elevation and
//! `R`, `G`, `B`, `A` are taken verbatim. A file carrying both is rejected.

use std::path::Path;

use exr::prelude::{AnyChannels, FlatSamples, read_first_flat_layer_from_file};
use image::{ColorType, DynamicImage};
use log::{debug, warn};

use crate::{CostField, CostValues, FieldError};

impl CostField {
    /// Load and decode the raster at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FieldError> {
        let path = path.as_ref();
        if is_exr(path) {
            return load_exr(path).map(checked);
        }
        let img = image::open(path)?;
        debug!(
            "loaded {} ({}x{}, {:?})",
            path.display(),
            img.width(),
            img.height(),
            img.color()
        );
        Self::from_image(&img)
    }

    /// Interpret an in-memory image as a cost field.
    pub fn from_image(img: &DynamicImage) -> Result<Self, FieldError> {
        decode(img).map(checked)
    }
}

fn is_exr(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("exr"))
}

fn decode(img: &DynamicImage) -> Result<CostField, FieldError> {
    let (w, h) = (img.width(), img.height());
    let field = match img.color() {
        ColorType::L8 | ColorType::L16 => {
            let luma = img.to_luma32f();
            CostField::from_fn(w, h, |x, y| CostValues::with_elevation(luma.get_pixel(x, y).0[0]))
        }
        ColorType::Rgba8 | ColorType::Rgba16 => {
            let rgba = img.to_rgba32f();
            CostField::from_fn(w, h, |x, y| {
                let [e, f, wx, wy] = rgba.get_pixel(x, y).0;
                CostValues {
                    elevation: e,
                    friction: f,
                    wind: [2.0 * wx - 1.0, 2.0 * wy - 1.0],
                }
            })
        }
        ColorType::Rgba32F => {
            let rgba = img.to_rgba32f();
            CostField::from_fn(w, h, |x, y| {
                let [e, f, wx, wy] = rgba.get_pixel(x, y).0;
                CostValues {
                    elevation: e,
                    friction: f,
                    wind: [wx, wy],
                }
            })
        }
        other => return Err(FieldError::UnsupportedChannels(other)),
    };
    Ok(field)
}

fn load_exr(path: &Path) -> Result<CostField, FieldError> {
    let image = read_first_flat_layer_from_file(path)?;
    let layer = image.layer_data;
    let w = u32::try_from(layer.size.width()).map_err(exr::error::Error::from)?;
    let h = u32::try_from(layer.size.height()).map_err(exr::error::Error::from)?;
    let channels = &layer.channel_data;
    debug!(
        "loaded {} ({w}x{h}, channels [{}])",
        path.display(),
        channel_names(channels).join(", ")
    );

    let luminance = channel(channels, "Y");
    let rgba = ["R", "G", "B", "A"].map(|name| channel(channels, name));
    let field = match (luminance, rgba) {
        (Some(_), [Some(_), Some(_), Some(_), Some(_)]) => {
            return Err(FieldError::AmbiguousExrChannels(channel_names(channels)));
        }
        (Some(y), _) => CostField::from_fn(w, h, |x, row| {
            CostValues::with_elevation(sample_at(&y, w, x, row))
        }),
        (None, [Some(r), Some(g), Some(b), Some(a)]) => CostField::from_fn(w, h, |x, row| {
            CostValues {
                elevation: sample_at(&r, w, x, row),
                friction: sample_at(&g, w, x, row),
                wind: [sample_at(&b, w, x, row), sample_at(&a, w, x, row)],
            }
        }),
        _ => return Err(FieldError::UnsupportedExrChannels(channel_names(channels))),
    };
    Ok(field)
}

fn channel(channels: &AnyChannels<FlatSamples>, name: &str) -> Option<Vec<f32>> {
    channels
        .list
        .iter()
        .find(|c| c.name.eq(name))
        .map(|c| c.sample_data.values_as_f32().collect())
}

fn channel_names(channels: &AnyChannels<FlatSamples>) -> Vec<String> {
    channels.list.iter().map(|c| c.name.to_string()).collect()
}

/// Row-major sample; missing samples (subsampled channels) read as zero.
fn sample_at(samples: &[f32], width: u32, x: u32, y: u32) -> f32 {
    let i = y as usize * width as usize + x as usize;
    samples.get(i).copied().unwrap_or(0.0)
}

fn checked(field: CostField) -> CostField {
    let negative = field.values().iter().filter(|v| v.friction < 0.0).count();
    if negative > 0 {
        warn!("{negative} cells have negative friction; edge costs are clamped at zero");
    }
    field
}
