use super::Packer;
use crate::config::{FitPolicy, PackerConfig};
use crate::model::{Frame, Rect};
use serde::Serialize;
use serde_json::{Value, json};

/// One region of the binary space partition.
///
/// A free leaf has no occupant and no children. Once a sprite occupies a node,
/// later sprites can only go into its children.
#[derive(Debug, Clone, Serialize)]
pub struct PackNode {
    pub rect: Rect,
    /// Insertion index of the sprite occupying this node.
    pub occupant: Option<usize>,
    pub first: Option<usize>,
    pub second: Option<usize>,
}

impl PackNode {
    fn free(rect: Rect) -> Self {
        Self {
            rect,
            occupant: None,
            first: None,
            second: None,
        }
    }

    pub fn is_free_leaf(&self) -> bool {
        self.occupant.is_none() && self.first.is_none() && self.second.is_none()
    }
}

/// Binary-tree packer over a fixed-size sheet.
///
/// Nodes live in an arena; `nodes[0]` is the root covering the sheet interior.
/// Each placement takes the top-left corner of the first free node (depth-first,
/// `first` before `second`) that fits the sprite plus padding, then splits what
/// is left of that node into a right and a bottom region, keeping the larger
/// leftover undivided.
pub struct TreePacker {
    nodes: Vec<PackNode>,
    sprite_padding: u32,
    fit_policy: FitPolicy,
    sheet: (u32, u32),
    placed: usize,
}

impl TreePacker {
    pub fn new(
        sprite_padding: u32,
        sheet_padding: u32,
        sheet_width: u32,
        sheet_height: u32,
        fit_policy: FitPolicy,
    ) -> Self {
        let w = sheet_width.saturating_sub(sheet_padding.saturating_mul(2));
        let h = sheet_height.saturating_sub(sheet_padding.saturating_mul(2));
        let root = PackNode::free(Rect::new(sheet_padding, sheet_padding, w, h));
        Self {
            nodes: vec![root],
            sprite_padding,
            fit_policy,
            sheet: (sheet_width, sheet_height),
            placed: 0,
        }
    }

    pub fn from_config(cfg: &PackerConfig) -> Self {
        Self::new(
            cfg.sprite_padding,
            cfg.sheet_padding,
            cfg.sheet_width,
            cfg.sheet_height,
            cfg.fit_policy,
        )
    }

    pub fn root(&self) -> &PackNode {
        &self.nodes[0]
    }

    pub fn nodes(&self) -> &[PackNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> Option<&PackNode> {
        self.nodes.get(idx)
    }

    /// Number of sprites placed so far.
    pub fn placed(&self) -> usize {
        self.placed
    }

    fn fits(&self, node: &PackNode, w: u32, h: u32) -> bool {
        let pad = self.sprite_padding;
        let need_w = pad.checked_mul(2).and_then(|p| w.checked_add(p));
        let need_h = match self.fit_policy {
            FitPolicy::Symmetric => pad.checked_mul(2).and_then(|p| h.checked_add(p)),
            FitPolicy::Legacy => h.checked_add(pad),
        };
        // A footprint past u32::MAX fits nowhere.
        match (need_w, need_h) {
            (Some(need_w), Some(need_h)) => {
                node.occupant.is_none() && node.rect.w >= need_w && node.rect.h >= need_h
            }
            _ => false,
        }
    }

    /// Depth-first search for the node that would take a `w`x`h` sprite.
    fn find(&self, idx: usize, w: u32, h: u32) -> Option<usize> {
        let node = &self.nodes[idx];
        if self.fits(node, w, h) {
            return Some(idx);
        }
        if let Some(found) = node.first.and_then(|c| self.find(c, w, h)) {
            return Some(found);
        }
        node.second.and_then(|c| self.find(c, w, h))
    }

    /// Occupies node `idx` with a `w`x`h` sprite and splits the leftover space.
    /// Returns the sprite's top-left pixel.
    fn place(&mut self, idx: usize, w: u32, h: u32) -> (u32, u32) {
        let pad = self.sprite_padding;
        let node = self.nodes[idx].rect;
        // `fits` bounds the width footprint by the node. Under `FitPolicy::Legacy`
        // the height footprint may hang past the node, so it saturates.
        let foot_w = w.saturating_add(pad.saturating_mul(2));
        let foot_h = h.saturating_add(pad.saturating_mul(2));
        let right_space = node.w.saturating_sub(foot_w);
        let bottom_space = node.h.saturating_sub(foot_h);

        let (first, second) = if right_space >= bottom_space {
            (
                Rect::new(node.x.saturating_add(foot_w), node.y, right_space, foot_h),
                Rect::new(node.x, node.y.saturating_add(foot_h), node.w, bottom_space),
            )
        } else {
            (
                Rect::new(node.x, node.y.saturating_add(foot_h), foot_w, bottom_space),
                Rect::new(node.x.saturating_add(foot_w), node.y, right_space, node.h),
            )
        };

        let first = self.push_child(first);
        let second = self.push_child(second);
        let target = &mut self.nodes[idx];
        target.occupant = Some(self.placed);
        target.first = first;
        target.second = second;
        self.placed += 1;

        (node.x + pad, node.y + pad)
    }

    // Zero-area regions can never take a sprite, so they are not materialized.
    fn push_child(&mut self, rect: Rect) -> Option<usize> {
        if rect.is_empty() {
            return None;
        }
        self.nodes.push(PackNode::free(rect));
        Some(self.nodes.len() - 1)
    }

    /// Nested JSON view of the tree, occupants shown by insertion index.
    pub fn to_json(&self) -> Value {
        self.to_json_with(|i| i.to_string())
    }

    /// Nested JSON view of the tree, occupants labelled by `label(insertion_index)`.
    pub fn to_json_with<F: Fn(usize) -> String>(&self, label: F) -> Value {
        self.node_json(0, &label)
    }

    fn node_json<F: Fn(usize) -> String>(&self, idx: usize, label: &F) -> Value {
        let node = &self.nodes[idx];
        let mut obj = json!({
            "x": node.rect.x,
            "y": node.rect.y,
            "w": node.rect.w,
            "h": node.rect.h,
        });
        if let Some(map) = obj.as_object_mut() {
            if let Some(i) = node.occupant {
                map.insert("sprite".into(), Value::String(label(i)));
            }
            if let Some(c) = node.first {
                map.insert("first".into(), self.node_json(c, label));
            }
            if let Some(c) = node.second {
                map.insert("second".into(), self.node_json(c, label));
            }
        }
        obj
    }
}

impl<K> Packer<K> for TreePacker {
    fn can_pack(&self, rect: &Rect) -> bool {
        self.find(0, rect.w, rect.h).is_some()
    }

    fn pack(&mut self, key: K, rect: &Rect) -> Option<Frame<K>> {
        let idx = self.find(0, rect.w, rect.h)?;
        let (x, y) = self.place(idx, rect.w, rect.h);
        tracing::trace!(node = idx, x, y, w = rect.w, h = rect.h, "placed");
        Some(Frame::placed(key, x, y, rect.w, rect.h))
    }

    fn sheet_size(&self) -> (u32, u32) {
        self.sheet
    }
}
