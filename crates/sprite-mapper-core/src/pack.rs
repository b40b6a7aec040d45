//! Pure packing entry points: sprite sizes in, placements out.
//!
//! None of these sort their input. Callers are expected to pass sprites in
//! descending `max(width, height)` order (see [`crate::pipeline::sort_sprites`]);
//! the greedy tree search places large sprites much more reliably when they
//! come first.

use crate::config::{Algorithm, FitPolicy, PackerConfig, validate_sheet};
use crate::error::{Result, SpriteMapperError};
use crate::model::{PackResult, Rect, Sprite};
use crate::packer::{LinearPacker, Packer, TreePacker};
use tracing::{debug, info, instrument};

/// Packs `sprites`, in the given order, into a fixed `sheet_width`x`sheet_height`
/// sheet using the binary-tree layout with a symmetric fit test.
///
/// Fails with `InsufficientSpace` as soon as one sprite cannot be placed; no
/// partial layout is returned.
pub fn pack(
    sprite_padding: u32,
    sheet_padding: u32,
    sheet_width: u32,
    sheet_height: u32,
    sprites: &[Sprite],
) -> Result<PackResult> {
    pack_tree(
        sprite_padding,
        sheet_padding,
        sheet_width,
        sheet_height,
        FitPolicy::Symmetric,
        sprites,
    )
}

/// Same as [`pack`] with an explicit height-test policy.
#[instrument(skip(sprites), fields(count = sprites.len()))]
pub fn pack_tree(
    sprite_padding: u32,
    sheet_padding: u32,
    sheet_width: u32,
    sheet_height: u32,
    fit_policy: FitPolicy,
    sprites: &[Sprite],
) -> Result<PackResult> {
    validate_sheet(sheet_width, sheet_height, sheet_padding)?;
    validate_sprites(sprites)?;
    log_if_unsorted(sprites);

    let mut tree = TreePacker::new(
        sprite_padding,
        sheet_padding,
        sheet_width,
        sheet_height,
        fit_policy,
    );
    let mut placed = Vec::with_capacity(sprites.len());
    for sprite in sprites {
        debug!(name = %sprite.name, w = sprite.width, h = sprite.height, "inserting");
        let rect = Rect::new(0, 0, sprite.width, sprite.height);
        match tree.pack(sprite.name.as_str(), &rect) {
            Some(frame) => placed.push(Sprite {
                x: frame.frame.x,
                y: frame.frame.y,
                ..sprite.clone()
            }),
            None => {
                let dump = tree.to_json_with(|i| placed[i].name.clone()).to_string();
                debug!(tree = %dump, "tree at failure");
                return Err(SpriteMapperError::InsufficientSpace {
                    name: sprite.name.clone(),
                    width: sprite.width,
                    height: sprite.height,
                    placed: placed.len(),
                    total: sprites.len(),
                    tree: dump,
                });
            }
        }
    }

    info!(w = sheet_width, h = sheet_height, sprites = placed.len(), "packed");
    Ok(PackResult {
        width: sheet_width,
        height: sheet_height,
        sprites: placed,
    })
}

/// Lays `sprites` out on a single row. The realized sheet size is whatever the
/// row needs, so this never runs out of space; a row wider than `u32::MAX`
/// fails with `InvalidInput`.
#[instrument(skip(sprites), fields(count = sprites.len()))]
pub fn pack_linear(sprite_padding: u32, sheet_padding: u32, sprites: &[Sprite]) -> Result<PackResult> {
    validate_sprites(sprites)?;
    let mut row = LinearPacker::new(sprite_padding, sheet_padding)?;
    let mut placed = Vec::with_capacity(sprites.len());
    for sprite in sprites {
        let rect = Rect::new(0, 0, sprite.width, sprite.height);
        let frame = row.pack((), &rect).ok_or_else(|| {
            SpriteMapperError::InvalidInput(format!(
                "row layout overflows at sprite '{}' ({}x{}) after {} of {} sprites",
                sprite.name,
                sprite.width,
                sprite.height,
                placed.len(),
                sprites.len()
            ))
        })?;
        placed.push(Sprite {
            x: frame.frame.x,
            y: frame.frame.y,
            ..sprite.clone()
        });
    }
    let (width, height) = <LinearPacker as Packer<()>>::sheet_size(&row);
    info!(w = width, h = height, sprites = placed.len(), "packed");
    Ok(PackResult {
        width,
        height,
        sprites: placed,
    })
}

/// Packs with every setting taken from `cfg`. Sprites are used in the given order.
pub fn pack_sprites(sprites: &[Sprite], cfg: &PackerConfig) -> Result<PackResult> {
    match cfg.algorithm {
        Algorithm::Tree => pack_tree(
            cfg.sprite_padding,
            cfg.sheet_padding,
            cfg.sheet_width,
            cfg.sheet_height,
            cfg.fit_policy,
            sprites,
        ),
        Algorithm::Linear => pack_linear(cfg.sprite_padding, cfg.sheet_padding, sprites),
    }
}

fn validate_sprites(sprites: &[Sprite]) -> Result<()> {
    for s in sprites {
        if s.width == 0 || s.height == 0 {
            return Err(SpriteMapperError::InvalidInput(format!(
                "sprite '{}' has zero size ({}x{})",
                s.name, s.width, s.height
            )));
        }
    }
    Ok(())
}

fn log_if_unsorted(sprites: &[Sprite]) {
    if let Some(pair) = sprites
        .windows(2)
        .find(|pair| pair[0].max_side() < pair[1].max_side())
    {
        debug!(
            before = %pair[0].name,
            after = %pair[1].name,
            "input is not sorted by max side (desc); packing may fail where a sorted order would fit"
        );
    }
}
