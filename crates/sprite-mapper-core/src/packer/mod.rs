use crate::model::{Frame, Rect};

pub mod linear;
pub mod tree;

pub use linear::LinearPacker;
pub use tree::{PackNode, TreePacker};

/// A packer places rectangles onto one sheet.
///
/// Implementations must ensure no overlaps and respect the configured sheet/sprite padding.
/// `pack` returns `None` if the rectangle cannot be placed; only `rect.w`/`rect.h` are read.
pub trait Packer<K> {
    fn can_pack(&self, rect: &Rect) -> bool;
    fn pack(&mut self, key: K, rect: &Rect) -> Option<Frame<K>>;
    /// Sheet size realized by the placements made so far.
    fn sheet_size(&self) -> (u32, u32);
}
