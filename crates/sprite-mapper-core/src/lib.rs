//! Core library for packing sprites into a single sheet.
//!
//! - Algorithm: binary-tree partition of a fixed-size sheet (first fit, depth first), plus a
//!   single-row layout for quick inspection
//! - Pipeline: `pack_images` takes in-memory images and returns the composited sheet + manifest data
//! - Manifest: `to_json_hash` writes the TexturePacker-style JSON hash
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use sprite_mapper_core::{InputImage, PackerConfig, pack_images, to_json_hash};
//! # fn main() -> anyhow::Result<()> {
//! let inputs = vec![
//!   InputImage { key: "a".into(), image: ImageReader::open("a.png")?.decode()? },
//!   InputImage { key: "b".into(), image: ImageReader::open("b.png")?.decode()? },
//! ];
//! let cfg = PackerConfig { sheet_width: 256, sheet_height: 256, ..Default::default() };
//! let out = pack_images(inputs, cfg)?;
//! out.rgba.save("icons.png")?;
//! println!("{}", to_json_hash(&out.atlas));
//! # Ok(()) }
//! ```
//!
//! Packing sizes only:
//! ```
//! use sprite_mapper_core::{Sprite, pack};
//! let placed = pack(1, 1, 512, 512, &[Sprite::new("icon", 100, 50)]).unwrap();
//! assert_eq!((placed.sprites[0].x, placed.sprites[0].y), (2, 2));
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod pack;
pub mod packer;
pub mod pipeline;
pub mod session;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use pack::*;
pub use packer::*;
pub use pipeline::*;
pub use session::*;

/// Convenience prelude for common types and functions.
/// Importing `sprite_mapper_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{
        Algorithm, FitPolicy, PackerConfig, PackerConfigBuilder, SortOrder,
    };
    pub use crate::error::SpriteMapperError;
    pub use crate::model::{Atlas, Frame, Meta, PackResult, PackStats, Rect, Sprite};
    pub use crate::session::SpriteSession;
    pub use crate::{
        InputImage, PackOutput, pack, pack_images, pack_layout, pack_linear, pack_sprites,
        pack_tree, sort_sprites, to_json_hash,
    };
}
