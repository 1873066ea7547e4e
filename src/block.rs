//! Block model: positioned content containers and the in-memory store.
//!
//! This module defines what sits on a slide (`Block`, `BlockKind`), how a
//! selection addresses a block or the image inside it (`SelectionTarget`),
//! and the runtime store that owns every live block (`BlockStore`).
//!
//! Blocks enter the store from the host page (registration) or from
//! `insert_centered`. The drag engines mutate geometry through
//! `set_geometry`; layer-order commands mutate `z_index`. Draw order is
//! `(z_index, insertion sequence)`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{EditorConfig, MinSize};
use crate::geom::Geometry;

#[cfg(test)]
#[path = "block_test.rs"]
mod block_test;

/// Unique identifier for a block.
pub type BlockId = Uuid;

/// The kind of content a block holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Text,
    Image,
    Code,
    Iframe,
    Video,
    /// Live, editable code sandbox.
    SandpoxEmbed,
    Snippet,
}

impl BlockKind {
    /// Whether double-activation enters the nested live-code editor rather
    /// than plain `contentEditable`.
    #[must_use]
    pub fn is_live_code(self) -> bool {
        matches!(self, Self::SandpoxEmbed)
    }

    /// Default `(width, height)` for a freshly inserted block.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Text => (400.0, 100.0),
            Self::Image => (400.0, 300.0),
            Self::Code | Self::Snippet => (480.0, 240.0),
            Self::Iframe | Self::Video => (480.0, 270.0),
            Self::SandpoxEmbed => (640.0, 360.0),
        }
    }
}

/// Which element of a block a selection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPart {
    /// The block container itself.
    Block,
    /// The `<img>` inside an image block.
    Image,
}

/// The element a selection or drag session operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionTarget {
    pub block: BlockId,
    pub part: TargetPart,
}

impl SelectionTarget {
    #[must_use]
    pub fn block(block: BlockId) -> Self {
        Self { block, part: TargetPart::Block }
    }

    #[must_use]
    pub fn image(block: BlockId) -> Self {
        Self { block, part: TargetPart::Image }
    }
}

/// A positioned content container on a slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Container geometry in virtual slide pixels.
    pub geometry: Geometry,
    /// Explicit geometry of the inner image, relative to the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Geometry>,
    /// Stacking order; lower values are drawn beneath higher values.
    pub z_index: i64,
    /// Content payload, opaque to the geometry engine.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Block {
    #[must_use]
    pub fn new(kind: BlockKind, geometry: Geometry, z_index: i64) -> Self {
        Self { id: Uuid::new_v4(), kind, geometry, image: None, z_index, content: serde_json::Value::Null }
    }

    /// Stored geometry for `part`, if the block carries one.
    #[must_use]
    pub fn geometry_of(&self, part: TargetPart) -> Option<Geometry> {
        match part {
            TargetPart::Block => Some(self.geometry),
            TargetPart::Image => self.image,
        }
    }

    /// Whether `part` can be selected and manipulated on this block.
    #[must_use]
    pub fn is_eligible(&self, part: TargetPart) -> bool {
        match part {
            TargetPart::Block => true,
            TargetPart::Image => self.kind == BlockKind::Image,
        }
    }

    /// Minimum size enforced when resizing `part`.
    #[must_use]
    pub fn min_size(&self, part: TargetPart, config: &EditorConfig) -> MinSize {
        match part {
            TargetPart::Block => config.block_min(),
            TargetPart::Image => config.image_min(),
        }
    }
}

struct Entry {
    block: Block,
    seq: u64,
}

/// In-memory store of the blocks on the active slide.
pub struct BlockStore {
    blocks: HashMap<BlockId, Entry>,
    next_seq: u64,
}

impl BlockStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { blocks: HashMap::new(), next_seq: 0 }
    }

    /// Insert or replace a block. A replaced block keeps its insertion order.
    ///
    /// Negative z-indices are raised to zero so the layer commands can always
    /// make room beneath the bottom block.
    pub fn insert(&mut self, mut block: Block) {
        if block.z_index < 0 {
            tracing::debug!(block = %block.id, z_index = block.z_index, "negative z-index clamped to 0");
            block.z_index = 0;
        }
        let seq = match self.blocks.get(&block.id) {
            Some(existing) => existing.seq,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };
        self.blocks.insert(block.id, Entry { block, seq });
    }

    /// Create a block of `kind` centered on the canvas, above every other block.
    pub fn insert_centered(&mut self, kind: BlockKind, config: &EditorConfig) -> BlockId {
        let (w, h) = kind.default_size();
        let width = w.min(config.canvas_width).max(config.min_width);
        let height = h.min(config.canvas_height).max(config.min_height);
        let geometry = Geometry::new(
            (config.canvas_width - width) * 0.5,
            (config.canvas_height - height) * 0.5,
            width,
            height,
        );
        self.ensure_headroom();
        let block = Block::new(kind, geometry, self.top_z().map_or(0, |z| z + 1));
        let id = block.id;
        self.insert(block);
        id
    }

    /// Remove a block by id, returning it if it was present.
    pub fn remove(&mut self, id: &BlockId) -> Option<Block> {
        self.blocks.remove(id).map(|e| e.block)
    }

    #[must_use]
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id).map(|e| &e.block)
    }

    /// Whether `target` names an existing block and an eligible part of it.
    #[must_use]
    pub fn is_eligible(&self, target: SelectionTarget) -> bool {
        self.get(&target.block).is_some_and(|b| b.is_eligible(target.part))
    }

    /// Write geometry for a target. Returns false if the block doesn't exist.
    pub fn set_geometry(&mut self, target: SelectionTarget, geometry: Geometry) -> bool {
        let Some(entry) = self.blocks.get_mut(&target.block) else {
            return false;
        };
        match target.part {
            TargetPart::Block => entry.block.geometry = geometry,
            TargetPart::Image => entry.block.image = Some(geometry),
        }
        true
    }

    /// Replace all blocks with a full snapshot, preserving the given order for ties.
    pub fn load_snapshot(&mut self, blocks: Vec<Block>) {
        self.blocks.clear();
        self.next_seq = 0;
        for block in blocks {
            self.insert(block);
        }
    }

    /// Return all blocks sorted by `(z_index, insertion order)` for draw order.
    #[must_use]
    pub fn sorted_blocks(&self) -> Vec<&Block> {
        let mut entries: Vec<&Entry> = self.blocks.values().collect();
        entries.sort_by(|a, b| a.block.z_index.cmp(&b.block.z_index).then_with(|| a.seq.cmp(&b.seq)));
        entries.into_iter().map(|e| &e.block).collect()
    }

    // --- Layer order ---

    /// Move a block above every other block. Returns the new z-index.
    pub fn bring_to_front(&mut self, id: &BlockId) -> Option<i64> {
        self.ensure_headroom();
        let top = self.blocks.iter().filter(|(k, _)| *k != id).map(|(_, e)| e.block.z_index).max();
        let entry = self.blocks.get_mut(id)?;
        if let Some(top) = top {
            if entry.block.z_index <= top {
                entry.block.z_index = top + 1;
            }
        }
        Some(entry.block.z_index)
    }

    /// Move a block below every other block. Z-indices never go negative, so
    /// the others are shifted up when there is no room beneath.
    pub fn send_to_back(&mut self, id: &BlockId) -> Option<i64> {
        if !self.blocks.contains_key(id) {
            return None;
        }
        let bottom = self.blocks.iter().filter(|(k, _)| *k != id).map(|(_, e)| e.block.z_index).min();
        let Some(bottom) = bottom else {
            return self.get(id).map(|b| b.z_index);
        };
        if bottom == 0 {
            self.ensure_headroom();
            for (k, e) in &mut self.blocks {
                if k != id {
                    e.block.z_index += 1;
                }
            }
        }
        let z = (bottom - 1).max(0);
        let entry = self.blocks.get_mut(id)?;
        entry.block.z_index = z;
        Some(z)
    }

    /// Swap draw position with the next block above, if any.
    pub fn bring_forward(&mut self, id: &BlockId) -> Option<i64> {
        self.swap_with_neighbor(id, true)
    }

    /// Swap draw position with the next block below, if any.
    pub fn send_backward(&mut self, id: &BlockId) -> Option<i64> {
        self.swap_with_neighbor(id, false)
    }

    fn swap_with_neighbor(&mut self, id: &BlockId, upward: bool) -> Option<i64> {
        self.ensure_headroom();
        let order: Vec<BlockId> = self.sorted_blocks().iter().map(|b| b.id).collect();
        let pos = order.iter().position(|b| b == id)?;
        let neighbor = if upward { order.get(pos + 1) } else { pos.checked_sub(1).and_then(|p| order.get(p)) };
        let Some(neighbor) = neighbor.copied() else {
            return self.get(id).map(|b| b.z_index);
        };

        let mine = self.blocks.get(id)?.block.z_index;
        let theirs = self.blocks.get(&neighbor)?.block.z_index;
        let (new_mine, new_theirs) = if mine == theirs {
            // Equal keys order by insertion; break the tie explicitly.
            if upward { (mine + 1, theirs) } else { (mine, theirs + 1) }
        } else {
            (theirs, mine)
        };
        if let Some(e) = self.blocks.get_mut(&neighbor) {
            e.block.z_index = new_theirs;
        }
        let entry = self.blocks.get_mut(id)?;
        entry.block.z_index = new_mine;
        Some(new_mine)
    }

    fn top_z(&self) -> Option<i64> {
        self.blocks.values().map(|e| e.block.z_index).max()
    }

    /// Renumber z-indices to `0..len` in draw order when the top block sits at
    /// `i64::MAX`, so raising a block by one cannot overflow.
    fn ensure_headroom(&mut self) {
        if self.top_z() != Some(i64::MAX) {
            return;
        }
        let order: Vec<BlockId> = self.sorted_blocks().iter().map(|b| b.id).collect();
        for (z, id) in (0_i64..).zip(order) {
            if let Some(entry) = self.blocks.get_mut(&id) {
                entry.block.z_index = z;
            }
        }
        tracing::debug!(blocks = self.blocks.len(), "z-indices compacted");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new()
    }
}
