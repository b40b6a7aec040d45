use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Layout algorithms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Binary-tree partition of a fixed-size sheet. Fails when a sprite does not fit.
    Tree,
    /// All sprites on one row; the sheet grows to fit. Never fails.
    Linear,
}

impl FromStr for Algorithm {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "linear" | "row" => Ok(Self::Linear),
            _ => Err(()),
        }
    }
}

/// Height test used when deciding whether a free node can take a sprite.
///
/// The width test is always `w >= 2 * sprite_padding + width`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FitPolicy {
    /// `h >= 2 * sprite_padding + height`: the whole footprint must fit.
    Symmetric,
    /// `h >= sprite_padding + height`: the bottom padding may hang past the node.
    /// Matches the layouts produced by earlier Sprite Mapper releases.
    Legacy,
}

impl FromStr for FitPolicy {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "symmetric" => Ok(Self::Symmetric),
            "legacy" => Ok(Self::Legacy),
            _ => Err(()),
        }
    }
}

/// Sorting orders applied before packing. All are stable with a name tie-break.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    MaxSideDesc,
    AreaDesc,
    NameAsc,
    None,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "max_side_desc" => Ok(Self::MaxSideDesc),
            "area_desc" => Ok(Self::AreaDesc),
            "name_asc" => Ok(Self::NameAsc),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Sheet width in pixels.
    pub sheet_width: u32,
    /// Sheet height in pixels.
    pub sheet_height: u32,
    /// Pixels reserved on every side of each sprite.
    pub sprite_padding: u32,
    /// Pixels around the entire sheet border.
    pub sheet_padding: u32,

    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    #[serde(default = "default_sort_order")]
    pub sort_order: SortOrder,
    #[serde(default = "default_fit_policy")]
    pub fit_policy: FitPolicy,

    /// Sheet file name written into the manifest's `meta.image`.
    #[serde(default = "default_image_name")]
    pub image_name: String,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            sheet_width: 512,
            sheet_height: 512,
            sprite_padding: 1,
            sheet_padding: 1,
            algorithm: default_algorithm(),
            sort_order: default_sort_order(),
            fit_policy: default_fit_policy(),
            image_name: default_image_name(),
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - Sheet dimensions are zero
    /// - `sheet_padding` leaves no interior on either axis
    pub fn validate(&self) -> crate::error::Result<()> {
        validate_sheet(self.sheet_width, self.sheet_height, self.sheet_padding)
    }

    /// Interior rectangle available to sprites: `(pad, pad, w - 2*pad, h - 2*pad)`.
    pub fn interior(&self) -> crate::model::Rect {
        let pad = self.sheet_padding;
        crate::model::Rect::new(
            pad,
            pad,
            self.sheet_width.saturating_sub(pad.saturating_mul(2)),
            self.sheet_height.saturating_sub(pad.saturating_mul(2)),
        )
    }
}

/// Checks that a `width`x`height` sheet keeps a non-empty interior after
/// `sheet_padding` is taken off every side.
pub fn validate_sheet(width: u32, height: u32, sheet_padding: u32) -> crate::error::Result<()> {
    use crate::error::SpriteMapperError;

    if width == 0 || height == 0 {
        return Err(SpriteMapperError::InvalidDimensions { width, height });
    }

    let total_border = sheet_padding.saturating_mul(2);
    if total_border >= width || total_border >= height {
        return Err(SpriteMapperError::InvalidInput(format!(
            "sheet_padding ({}) * 2 leaves no interior in a {}x{} sheet",
            sheet_padding, width, height
        )));
    }

    Ok(())
}

fn default_algorithm() -> Algorithm {
    Algorithm::Tree
}
fn default_sort_order() -> SortOrder {
    SortOrder::MaxSideDesc
}
fn default_fit_policy() -> FitPolicy {
    FitPolicy::Symmetric
}
fn default_image_name() -> String {
    "icons.png".into()
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_sheet_size(mut self, w: u32, h: u32) -> Self {
        self.cfg.sheet_width = w;
        self.cfg.sheet_height = h;
        self
    }
    pub fn sprite_padding(mut self, v: u32) -> Self {
        self.cfg.sprite_padding = v;
        self
    }
    pub fn sheet_padding(mut self, v: u32) -> Self {
        self.cfg.sheet_padding = v;
        self
    }
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.cfg.algorithm = v;
        self
    }
    pub fn sort_order(mut self, v: SortOrder) -> Self {
        self.cfg.sort_order = v;
        self
    }
    pub fn fit_policy(mut self, v: FitPolicy) -> Self {
        self.cfg.fit_policy = v;
        self
    }
    pub fn image_name(mut self, v: impl Into<String>) -> Self {
        self.cfg.image_name = v.into();
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}

impl PackerConfig {
    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}
