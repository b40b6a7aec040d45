use crate::config::{PackerConfig, SortOrder};
use crate::error::{Result, SpriteMapperError};
use crate::model::{Atlas, Frame, Meta, PackResult, Sprite};
use crate::pack::pack_sprites;
use image::{DynamicImage, RgbaImage};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// In-memory image to pack (sprite name + decoded image).
pub struct InputImage {
    pub key: String,
    pub image: DynamicImage,
}

/// Output of a packing run: manifest data and the composited sheet.
pub struct PackOutput {
    pub atlas: Atlas,
    pub rgba: RgbaImage,
}

impl PackOutput {
    /// Computes usage statistics for this output.
    /// This is a convenience method that delegates to `atlas.stats()`.
    pub fn stats(&self) -> crate::model::PackStats {
        self.atlas.stats()
    }
}

/// Packs `inputs` into one sheet using configuration `cfg` and returns the manifest data and RGBA sheet.
///
/// Notes:
/// - Inputs are sorted per `cfg.sort_order` (stable, name tie-break) before packing.
/// - Sprite names must be unique.
/// - No inputs is not an error: the result is a blank sheet with no frames.
#[instrument(skip_all)]
pub fn pack_images(inputs: Vec<InputImage>, cfg: PackerConfig) -> Result<PackOutput> {
    pack_image_slice(&inputs, &cfg)
}

pub(crate) fn pack_image_slice(inputs: &[InputImage], cfg: &PackerConfig) -> Result<PackOutput> {
    cfg.validate()?;

    let rgba = prepare_inputs(inputs);
    let mut sprites: Vec<Sprite> = inputs
        .iter()
        .zip(&rgba)
        .map(|(inp, img)| Sprite::new(inp.key.clone(), img.width(), img.height()))
        .collect();
    ensure_unique_names(&sprites)?;
    sort_sprites(&mut sprites, &cfg.sort_order);

    let result = pack_sprites(&sprites, cfg)?;

    let lookup: HashMap<&str, &RgbaImage> = inputs
        .iter()
        .zip(&rgba)
        .map(|(inp, img)| (inp.key.as_str(), img))
        .collect();
    let mut canvas = RgbaImage::new(result.width, result.height);
    for s in &result.sprites {
        if let Some(img) = lookup.get(s.name.as_str()) {
            crate::compositing::blit_rgba(img, &mut canvas, s.x, s.y);
        }
    }
    debug!(w = result.width, h = result.height, frames = result.sprites.len(), "sheet composed");

    let atlas = build_atlas(&result, cfg);
    Ok(PackOutput { atlas, rgba: canvas })
}

fn prepare_inputs(inputs: &[InputImage]) -> Vec<RgbaImage> {
    #[cfg(feature = "parallel")]
    {
        inputs.par_iter().map(|inp| inp.image.to_rgba8()).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().map(|inp| inp.image.to_rgba8()).collect()
    }
}

// ---------------- Layout-only API ----------------

/// Packs sizes onto one sheet without compositing pixel data.
/// Inputs are (name, width, height). Returns the manifest data only.
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: PackerConfig,
) -> Result<Atlas<String>> {
    let sprites: Vec<Sprite> = inputs
        .into_iter()
        .map(|(k, w, h)| Sprite::new(k, w, h))
        .collect();
    pack_sprite_layout(sprites, &cfg)
}

pub(crate) fn pack_sprite_layout(mut sprites: Vec<Sprite>, cfg: &PackerConfig) -> Result<Atlas> {
    cfg.validate()?;
    ensure_unique_names(&sprites)?;
    sort_sprites(&mut sprites, &cfg.sort_order);
    let result = pack_sprites(&sprites, cfg)?;
    Ok(build_atlas(&result, cfg))
}

/// Builds manifest data from a finished pack.
pub fn build_atlas(result: &PackResult, cfg: &PackerConfig) -> Atlas {
    let frames = result
        .sprites
        .iter()
        .map(|s| Frame::placed(s.name.clone(), s.x, s.y, s.width, s.height))
        .collect();
    Atlas {
        width: result.width,
        height: result.height,
        frames,
        meta: Meta::new(cfg.image_name.clone(), result.width, result.height),
    }
}

/// Sorts sprites in place per `order`. The sort is stable and ties are broken
/// by name, so the result does not depend on the incoming order.
pub fn sort_sprites(sprites: &mut [Sprite], order: &SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::NameAsc => sprites.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::MaxSideDesc => sprites.sort_by(|a, b| {
            b.max_side()
                .cmp(&a.max_side())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortOrder::AreaDesc => sprites.sort_by(|a, b| {
            b.area()
                .cmp(&a.area())
                .then_with(|| a.name.cmp(&b.name))
        }),
    }
}

fn ensure_unique_names(sprites: &[Sprite]) -> Result<()> {
    let mut seen = HashSet::with_capacity(sprites.len());
    for s in sprites {
        if !seen.insert(s.name.as_str()) {
            return Err(SpriteMapperError::InvalidInput(format!(
                "duplicate sprite name '{}'",
                s.name
            )));
        }
    }
    Ok(())
}

/// Sprite name for an image file: its file name up to the first `.`.
///
/// `icons/arrow.left.png` becomes `arrow`.
pub fn sprite_name(path: &str) -> String {
    let file = Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path);
    match file.find('.') {
        Some(idx) => file[..idx].to_string(),
        None => file.to_string(),
    }
}
