use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`).
    pub fn x2(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn y2(&self) -> u32 {
        self.y + self.h
    }
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    /// Returns true if `r` is fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.x2() <= self.x2() && r.y2() <= self.y2()
    }
    /// Returns true if the two rectangles share any pixel.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.x2() || r.x >= self.x2() || self.y >= r.y2() || r.y >= self.y2())
    }
}

/// One source image to place on the sheet.
///
/// `x,y` is the placement of the sprite's top-left pixel, assigned by a pack
/// call. It stays `(0, 0)` until the sprite has been packed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprite {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl Sprite {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            x: 0,
            y: 0,
        }
    }

    pub fn max_side(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Placed rectangle of the sprite pixels (no padding).
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Placed rectangle inflated by `padding` on every side.
    pub fn footprint(&self, padding: u32) -> Rect {
        Rect::new(
            self.x.saturating_sub(padding),
            self.y.saturating_sub(padding),
            self.width.saturating_add(padding.saturating_mul(2)),
            self.height.saturating_add(padding.saturating_mul(2)),
        )
    }
}

/// Result of a successful pack: realized sheet size and every sprite with its
/// final placement, in packing order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackResult {
    pub width: u32,
    pub height: u32,
    pub sprites: Vec<Sprite>,
}

/// A placed frame within the sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame<K = String> {
    /// Sprite name (file name without extension).
    pub key: K,
    /// Placed rectangle within the sheet.
    pub frame: Rect,
    /// Always false; sprites are never rotated.
    pub rotated: bool,
    /// Always false; sprites are never trimmed.
    pub trimmed: bool,
    /// Source sub-rect within the original image.
    pub source: Rect,
    /// Original image size.
    pub source_size: (u32, u32),
}

impl<K> Frame<K> {
    /// Frame for an untrimmed, unrotated sprite placed at `(x, y)`.
    pub fn placed(key: K, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            key,
            frame: Rect::new(x, y, w, h),
            rotated: false,
            trimmed: false,
            source: Rect::new(0, 0, w, h),
            source_size: (w, h),
        }
    }
}

/// Sheet-level metadata written into the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub app: String,
    pub version: String,
    /// File name of the sheet image the manifest refers to.
    pub image: String,
    pub format: String,
    pub size: (u32, u32),
    /// Kept as a string; consumers of the hash format expect `"1"`.
    pub scale: String,
}

impl Meta {
    pub fn new(image: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            app: "Sprite Mapper".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            image: image.into(),
            format: "RGBA8888".into(),
            size: (width, height),
            scale: "1".into(),
        }
    }
}

/// The packed sheet: size, placed frames and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atlas<K = String> {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<Frame<K>>,
    pub meta: Meta,
}

/// Statistics about sheet usage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Number of frames (sprites) on the sheet.
    pub num_frames: usize,
    /// Sheet area (width * height).
    pub sheet_area: u64,
    /// Area covered by sprite pixels (padding excluded).
    pub used_frame_area: u64,
    /// used_frame_area / sheet_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl<K> Atlas<K> {
    /// Computes usage statistics for this sheet.
    pub fn stats(&self) -> PackStats {
        let sheet_area = self.width as u64 * self.height as u64;
        let used_frame_area: u64 = self
            .frames
            .iter()
            .map(|f| f.frame.w as u64 * f.frame.h as u64)
            .sum();
        let occupancy = if sheet_area > 0 {
            used_frame_area as f64 / sheet_area as f64
        } else {
            0.0
        };
        PackStats {
            num_frames: self.frames.len(),
            sheet_area,
            used_frame_area,
            occupancy,
        }
    }
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Frames: {}, Occupancy: {:.2}%, Waste: {:.2}%, Sheet Area: {} px², Used Area: {} px²",
            self.num_frames,
            self.occupancy * 100.0,
            self.waste_percentage(),
            self.sheet_area,
            self.used_frame_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.sheet_area.saturating_sub(self.used_frame_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.sheet_area > 0 {
            (self.wasted_area() as f64 / self.sheet_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
