// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The flow document: four normalized, ordered entity collections.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::choice_item::ChoiceItem;
use super::edge::Edge;
use super::ids::{BlockId, BotId, ChoiceItemId, EdgeId, StepId};
use super::step::Step;

/// The kind of a document entity, for errors and deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Block,
    Step,
    Edge,
    ChoiceItem,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Step => "step",
            Self::Edge => "edge",
            Self::ChoiceItem => "choice_item",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An id-keyed map plus the insertion-ordered id list, kept in lockstep.
///
/// This is the normalized `byId`/`allIds` shape the builder UI indexes into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTable<I: Ord, T> {
    order: Vec<I>,
    by_id: BTreeMap<I, T>,
}

impl<I: Ord, T> Default for EntityTable<I, T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            by_id: BTreeMap::new(),
        }
    }
}

impl<I: Ord + Clone, T> EntityTable<I, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &I) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &I) -> Option<&T> {
        self.by_id.get(id)
    }

    pub fn get_mut(&mut self, id: &I) -> Option<&mut T> {
        self.by_id.get_mut(id)
    }

    /// Registers `entity` under `id`, appending the id to the order list.
    /// The id must not already be present.
    pub fn push(&mut self, id: I, entity: T) {
        let previous = self.by_id.insert(id.clone(), entity);
        debug_assert!(previous.is_none(), "push on an already registered id");
        self.order.push(id);
    }

    pub fn remove(&mut self, id: &I) -> Option<T> {
        let entity = self.by_id.remove(id)?;
        if let Some(index) = self.order.iter().position(|existing| existing == id) {
            self.order.remove(index);
        }
        Some(entity)
    }

    pub fn ids(&self) -> &[I] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&I, &T)> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id).map(|entity| (id, entity)))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, entity)| entity)
    }

    fn is_consistent(&self) -> bool {
        if self.order.len() != self.by_id.len() {
            return false;
        }
        let mut seen = BTreeSet::new();
        self.order
            .iter()
            .all(|id| seen.insert(id) && self.by_id.contains_key(id))
    }
}

/// The mutable content of a [`Bot`]; ops clone it, mutate the clone, and
/// swap it back in on success.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BotGraph {
    blocks: EntityTable<BlockId, Block>,
    steps: EntityTable<StepId, Step>,
    edges: EntityTable<EdgeId, Edge>,
    choice_items: EntityTable<ChoiceItemId, ChoiceItem>,
}

impl BotGraph {
    pub fn blocks(&self) -> &EntityTable<BlockId, Block> {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut EntityTable<BlockId, Block> {
        &mut self.blocks
    }

    pub fn steps(&self) -> &EntityTable<StepId, Step> {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut EntityTable<StepId, Step> {
        &mut self.steps
    }

    pub fn edges(&self) -> &EntityTable<EdgeId, Edge> {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut EntityTable<EdgeId, Edge> {
        &mut self.edges
    }

    pub fn choice_items(&self) -> &EntityTable<ChoiceItemId, ChoiceItem> {
        &self.choice_items
    }

    pub fn choice_items_mut(&mut self) -> &mut EntityTable<ChoiceItemId, ChoiceItem> {
        &mut self.choice_items
    }
}

/// The aggregate root a builder session edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    bot_id: BotId,
    name: String,
    graph: BotGraph,
    rev: u64,
}

impl Bot {
    pub fn new(bot_id: BotId, name: impl Into<String>) -> Self {
        Self::new_with(bot_id, name, BotGraph::default())
    }

    pub fn new_with(bot_id: BotId, name: impl Into<String>, graph: BotGraph) -> Self {
        Self {
            bot_id,
            name: name.into(),
            graph,
            rev: 0,
        }
    }

    pub fn bot_id(&self) -> &BotId {
        &self.bot_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn graph(&self) -> &BotGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut BotGraph {
        &mut self.graph
    }

    pub fn set_graph(&mut self, graph: BotGraph) {
        self.graph = graph;
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    /// Checks the structural invariants of the document.
    ///
    /// A step listed in no block is allowed (the detach half of a
    /// two-call move); everything else must line up.
    pub fn validate(&self) -> Result<(), BotInvariantError> {
        let graph = &self.graph;

        if !graph.blocks.is_consistent() {
            return Err(BotInvariantError::TableCorrupt {
                kind: EntityKind::Block,
            });
        }
        if !graph.steps.is_consistent() {
            return Err(BotInvariantError::TableCorrupt {
                kind: EntityKind::Step,
            });
        }
        if !graph.edges.is_consistent() {
            return Err(BotInvariantError::TableCorrupt {
                kind: EntityKind::Edge,
            });
        }
        if !graph.choice_items.is_consistent() {
            return Err(BotInvariantError::TableCorrupt {
                kind: EntityKind::ChoiceItem,
            });
        }

        let mut owner_of_step: BTreeMap<&StepId, &BlockId> = BTreeMap::new();
        for (block_id, block) in graph.blocks.iter() {
            for step_id in block.step_ids() {
                let Some(step) = graph.steps.get(step_id) else {
                    return Err(BotInvariantError::UnknownStepInBlock {
                        block_id: block_id.clone(),
                        step_id: step_id.clone(),
                    });
                };
                if owner_of_step.insert(step_id, block_id).is_some() {
                    return Err(BotInvariantError::StepInMultipleBlocks {
                        step_id: step_id.clone(),
                    });
                }
                if step.block_id() != block_id {
                    return Err(BotInvariantError::StepBlockMismatch {
                        step_id: step_id.clone(),
                        listed_in: block_id.clone(),
                        stamped_with: step.block_id().clone(),
                    });
                }
            }
        }

        for (edge_id, edge) in graph.edges.iter() {
            let from = edge.from();
            let source_ok = graph.blocks.contains(from.block_id())
                && graph.steps.contains(from.step_id())
                && from
                    .item_id()
                    .map_or(true, |item_id| graph.choice_items.contains(item_id));
            if !source_ok {
                return Err(BotInvariantError::EdgeSourceMissing {
                    edge_id: edge_id.clone(),
                });
            }

            let to = edge.to();
            let target_ok = graph.blocks.contains(to.block_id())
                && to
                    .step_id()
                    .map_or(true, |step_id| graph.steps.contains(step_id));
            if !target_ok {
                return Err(BotInvariantError::EdgeTargetMissing {
                    edge_id: edge_id.clone(),
                });
            }
        }

        for (item_id, item) in graph.choice_items.iter() {
            let Some(step) = graph.steps.get(item.step_id()) else {
                return Err(BotInvariantError::ItemOwnerMissing {
                    item_id: item_id.clone(),
                });
            };
            let listed = step
                .choice_item_ids()
                .map_or(false, |ids| ids.iter().any(|id| id == item_id));
            if !listed {
                return Err(BotInvariantError::ItemNotListedByOwner {
                    item_id: item_id.clone(),
                    step_id: item.step_id().clone(),
                });
            }
        }

        for (step_id, step) in graph.steps.iter() {
            let Some(item_ids) = step.choice_item_ids() else {
                continue;
            };
            for item_id in item_ids {
                let owned = graph
                    .choice_items
                    .get(item_id)
                    .map_or(false, |item| item.step_id() == step_id);
                if !owned {
                    return Err(BotInvariantError::UnknownItemInStep {
                        step_id: step_id.clone(),
                        item_id: item_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotInvariantError {
    TableCorrupt {
        kind: EntityKind,
    },
    UnknownStepInBlock {
        block_id: BlockId,
        step_id: StepId,
    },
    StepInMultipleBlocks {
        step_id: StepId,
    },
    StepBlockMismatch {
        step_id: StepId,
        listed_in: BlockId,
        stamped_with: BlockId,
    },
    EdgeSourceMissing {
        edge_id: EdgeId,
    },
    EdgeTargetMissing {
        edge_id: EdgeId,
    },
    ItemOwnerMissing {
        item_id: ChoiceItemId,
    },
    ItemNotListedByOwner {
        item_id: ChoiceItemId,
        step_id: StepId,
    },
    UnknownItemInStep {
        step_id: StepId,
        item_id: ChoiceItemId,
    },
}

impl fmt::Display for BotInvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableCorrupt { kind } => {
                write!(f, "{kind} table order and index disagree")
            }
            Self::UnknownStepInBlock { block_id, step_id } => {
                write!(f, "block {block_id} lists unknown step {step_id}")
            }
            Self::StepInMultipleBlocks { step_id } => {
                write!(f, "step {step_id} is listed by more than one block")
            }
            Self::StepBlockMismatch {
                step_id,
                listed_in,
                stamped_with,
            } => write!(
                f,
                "step {step_id} is listed in block {listed_in} but stamped with {stamped_with}"
            ),
            Self::EdgeSourceMissing { edge_id } => {
                write!(f, "edge {edge_id} leaves a missing entity")
            }
            Self::EdgeTargetMissing { edge_id } => {
                write!(f, "edge {edge_id} targets a missing entity")
            }
            Self::ItemOwnerMissing { item_id } => {
                write!(f, "choice item {item_id} is owned by a missing step")
            }
            Self::ItemNotListedByOwner { item_id, step_id } => {
                write!(f, "choice item {item_id} is not listed by its step {step_id}")
            }
            Self::UnknownItemInStep { step_id, item_id } => {
                write!(f, "step {step_id} lists unknown choice item {item_id}")
            }
        }
    }
}

impl std::error::Error for BotInvariantError {}
