use super::Packer;
use crate::config::PackerConfig;
use crate::error::{Result, SpriteMapperError};
use crate::model::{Frame, Rect};

/// Single-row layout. Mostly useful for checking sprite sizes and names at a
/// glance; the sheet grows to whatever the row needs.
///
/// The row starts at `2 * sheet_padding` on both axes and consecutive sprites
/// are `2 * sprite_padding` apart.
pub struct LinearPacker {
    spacing: u32,
    margin: u32,
    cursor: (u32, u32),
    size: (u32, u32),
}

impl LinearPacker {
    /// Fails with `InvalidInput` when the margin or spacing does not fit in `u32`.
    pub fn new(sprite_padding: u32, sheet_padding: u32) -> Result<Self> {
        let margin = sheet_padding.checked_mul(2).ok_or_else(|| {
            SpriteMapperError::InvalidInput(format!(
                "sheet_padding ({}) is too large for a row layout",
                sheet_padding
            ))
        })?;
        let spacing = sprite_padding.checked_mul(2).ok_or_else(|| {
            SpriteMapperError::InvalidInput(format!(
                "sprite_padding ({}) is too large for a row layout",
                sprite_padding
            ))
        })?;
        Ok(Self {
            spacing,
            margin,
            cursor: (margin, margin),
            size: (margin, margin),
        })
    }

    pub fn from_config(cfg: &PackerConfig) -> Result<Self> {
        Self::new(cfg.sprite_padding, cfg.sheet_padding)
    }
}

impl<K> Packer<K> for LinearPacker {
    fn can_pack(&self, rect: &Rect) -> bool {
        self.cursor
            .0
            .checked_add(rect.w)
            .and_then(|v| v.checked_add(self.spacing))
            .and_then(|v| v.checked_add(self.margin))
            .is_some()
            && self
                .cursor
                .1
                .checked_add(rect.h)
                .and_then(|v| v.checked_add(self.margin))
                .is_some()
    }

    fn pack(&mut self, key: K, rect: &Rect) -> Option<Frame<K>> {
        let (x, y) = self.cursor;
        // Nothing moves unless the whole row still fits in u32.
        let next_x = x.checked_add(rect.w)?.checked_add(self.spacing)?;
        let right = next_x.checked_add(self.margin)?;
        let bottom = y.checked_add(rect.h)?.checked_add(self.margin)?;
        self.cursor.0 = next_x;
        self.size.0 = self.size.0.max(right);
        self.size.1 = self.size.1.max(bottom);
        Some(Frame::placed(key, x, y, rect.w, rect.h))
    }

    fn sheet_size(&self) -> (u32, u32) {
        self.size
    }
}
