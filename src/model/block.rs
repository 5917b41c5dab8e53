// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{BlockId, StepId};

/// Canvas position of a block, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An ordered container of steps on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    block_id: BlockId,
    title: String,
    coordinates: Coordinates,
    step_ids: Vec<StepId>,
}

impl Block {
    pub fn new(block_id: BlockId, title: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            block_id,
            title: title.into(),
            coordinates,
            step_ids: Vec::new(),
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = coordinates;
    }

    pub fn step_ids(&self) -> &[StepId] {
        &self.step_ids
    }

    pub fn is_empty(&self) -> bool {
        self.step_ids.is_empty()
    }

    /// Splices `step_id` into the ordered list. The index is clamped to the
    /// list length; `None` inserts at the front.
    pub fn insert_step_id(&mut self, step_id: StepId, index: Option<usize>) {
        let index = index.unwrap_or(0).min(self.step_ids.len());
        self.step_ids.insert(index, step_id);
    }

    /// Removes the single occurrence of `step_id`, if present.
    pub fn remove_step_id(&mut self, step_id: &StepId) -> bool {
        let Some(index) = self.step_ids.iter().position(|id| id == step_id) else {
            return false;
        };
        self.step_ids.remove(index);
        true
    }

    pub fn contains_step_id(&self, step_id: &StepId) -> bool {
        self.step_ids.iter().any(|id| id == step_id)
    }
}

/// Partial block update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPatch {
    pub title: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl Block {
    pub fn apply_patch(&mut self, patch: &BlockPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(coordinates) = patch.coordinates {
            self.coordinates = coordinates;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, BlockPatch, Coordinates};
    use crate::model::{BlockId, StepId};

    fn sid(value: &str) -> StepId {
        StepId::new(value).expect("step id")
    }

    fn block() -> Block {
        Block::new(
            BlockId::new("b:1").expect("block id"),
            "Welcome",
            Coordinates::new(10, 20),
        )
    }

    #[test]
    fn insert_defaults_to_front_and_clamps_index() {
        let mut block = block();
        block.insert_step_id(sid("s:a"), None);
        block.insert_step_id(sid("s:b"), None);
        block.insert_step_id(sid("s:c"), Some(99));

        assert_eq!(block.step_ids(), &[sid("s:b"), sid("s:a"), sid("s:c")]);
    }

    #[test]
    fn remove_drops_a_single_occurrence() {
        let mut block = block();
        block.insert_step_id(sid("s:a"), None);
        block.insert_step_id(sid("s:b"), Some(1));

        assert!(block.remove_step_id(&sid("s:a")));
        assert!(!block.remove_step_id(&sid("s:a")));
        assert_eq!(block.step_ids(), &[sid("s:b")]);
    }

    #[test]
    fn patch_merges_set_fields() {
        let mut block = block();
        block.apply_patch(&BlockPatch {
            title: Some("Intro".to_owned()),
            coordinates: None,
        });

        assert_eq!(block.title(), "Intro");
        assert_eq!(block.coordinates(), Coordinates::new(10, 20));
    }
}
