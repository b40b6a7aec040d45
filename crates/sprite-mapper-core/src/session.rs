use crate::config::PackerConfig;
use crate::error::Result;
use crate::model::{Atlas, Sprite};
use crate::pipeline::{InputImage, PackOutput, pack_image_slice, pack_sprite_layout, sort_sprites};
use tracing::{debug, warn};

/// Working set of sprites for one batch of input files.
///
/// A batch starts with [`SpriteSession::begin_batch`], which drops whatever the
/// previous batch loaded. Packing never mutates the session, so the same batch
/// can be packed again with a different config.
pub struct SpriteSession {
    cfg: PackerConfig,
    entries: Vec<InputImage>,
    failures: Vec<String>,
}

impl SpriteSession {
    pub fn new(cfg: PackerConfig) -> Self {
        Self {
            cfg,
            entries: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn config(&self) -> &PackerConfig {
        &self.cfg
    }

    pub fn set_config(&mut self, cfg: PackerConfig) {
        self.cfg = cfg;
    }

    /// Clears loaded sprites and recorded failures.
    pub fn begin_batch(&mut self) {
        self.entries.clear();
        self.failures.clear();
    }

    /// Adds a decoded image. An image with the same name as one already in the
    /// batch replaces it.
    pub fn add(&mut self, input: InputImage) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == input.key) {
            debug!(name = %input.key, "replacing sprite with the same name");
            *existing = input;
        } else {
            self.entries.push(input);
        }
    }

    /// Records an input that could not be decoded.
    pub fn record_failure(&mut self, name: impl Into<String>) {
        let name = name.into();
        warn!(%name, "cannot load image");
        self.failures.push(name);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Sprites of this batch, sorted per the session config. Placements are all `(0, 0)`.
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut sprites: Vec<Sprite> = self
            .entries
            .iter()
            .map(|e| Sprite::new(e.key.clone(), e.image.width(), e.image.height()))
            .collect();
        sort_sprites(&mut sprites, &self.cfg.sort_order);
        sprites
    }

    /// One-line status, e.g. `12 icons in sprite sheet. Errors: 1.`
    pub fn summary(&self) -> String {
        let mut line = format!("{} icons in sprite sheet.", self.len());
        if self.error_count() > 0 {
            line.push_str(&format!(" Errors: {}.", self.error_count()));
        }
        line
    }

    /// Packs the current batch into a sheet image plus manifest data.
    pub fn pack(&self) -> Result<PackOutput> {
        pack_image_slice(&self.entries, &self.cfg)
    }

    /// Packs the current batch without compositing pixels.
    pub fn pack_layout(&self) -> Result<Atlas> {
        pack_sprite_layout(self.sprites(), &self.cfg)
    }
}
