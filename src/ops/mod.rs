// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for flow documents.
//!
//! Operations are applied with optimistic concurrency (revision checks)
//! against a clone of the document graph that is swapped in only when every
//! op succeeds, and produce a minimal delta the UI can use to refresh
//! derived state.

use std::collections::HashSet;
use std::fmt;

use crate::model::{
    Block, BlockId, BlockPatch, Bot, BotGraph, ChoiceItem, ChoiceItemId, ChoiceItemPatch, Edge,
    EdgeId, EdgePatch, EdgeSource, EdgeTarget, EntityKind, Step, StepId, StepPatch,
    StepPatchMismatch,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Step(StepOp),
    Block(BlockOp),
    Edge(EdgeOp),
    Item(ItemOp),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOp {
    /// Registers `step` (restamped with `block_id`) and splices its id into
    /// the block's list at `index` (default front). Prunes empty blocks
    /// afterwards.
    Create {
        block_id: BlockId,
        step: Step,
        index: Option<usize>,
    },
    Update {
        step_id: StepId,
        patch: StepPatch,
    },
    /// Removes the step id from its owning block without re-attaching it
    /// anywhere; the step record itself stays. The drag-and-drop move is
    /// this op followed by `Create` with the same step at the destination,
    /// or the single `Move` op below.
    Detach {
        step_id: StepId,
    },
    Move {
        step_id: StepId,
        dest_block_id: BlockId,
        index: Option<usize>,
    },
    /// Ordered cascade: owned choice items first, then edges leaving the
    /// step, then the block listing, then the step record itself.
    Delete {
        step_id: StepId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOp {
    Create {
        block: Block,
    },
    Update {
        block_id: BlockId,
        patch: BlockPatch,
    },
    /// Deletes every contained step with the full step cascade, then every
    /// edge touching the block, then the block itself.
    Delete {
        block_id: BlockId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeOp {
    /// Validates both endpoints and displaces an existing edge with the
    /// same source endpoint; a source carries at most one outgoing edge.
    Create {
        edge: Edge,
    },
    Update {
        edge_id: EdgeId,
        patch: EdgePatch,
    },
    Delete {
        edge_id: EdgeId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOp {
    /// Registers the item and splices its id into the owning choice input's
    /// list at `index` (default end).
    Create {
        item: ChoiceItem,
        index: Option<usize>,
    },
    Update {
        item_id: ChoiceItemId,
        patch: ChoiceItemPatch,
    },
    /// Removes the item from its owner's list and drops edges leaving it.
    Delete {
        item_id: ChoiceItemId,
    },
}

/// A (kind, id) pair naming one document entity in a [`Delta`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityRef {
    kind: EntityKind,
    id: String,
}

impl EntityRef {
    pub fn block(block_id: &BlockId) -> Self {
        Self {
            kind: EntityKind::Block,
            id: block_id.as_str().to_owned(),
        }
    }

    pub fn step(step_id: &StepId) -> Self {
        Self {
            kind: EntityKind::Step,
            id: step_id.as_str().to_owned(),
        }
    }

    pub fn edge(edge_id: &EdgeId) -> Self {
        Self {
            kind: EntityKind::Edge,
            id: edge_id.as_str().to_owned(),
        }
    }

    pub fn choice_item(item_id: &ChoiceItemId) -> Self {
        Self {
            kind: EntityKind::ChoiceItem,
            id: item_id.as_str().to_owned(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which entities changed as the result of
/// applying ops.
///
/// This is intentionally coarse: it reports only added/removed/updated
/// [`EntityRef`]s, sorted for stable output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub updated: Vec<EntityRef>,
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<EntityRef>,
    removed: HashSet<EntityRef>,
    updated: HashSet<EntityRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, entity_ref: EntityRef) {
        self.removed.remove(&entity_ref);
        self.updated.remove(&entity_ref);
        self.added.insert(entity_ref);
    }

    fn record_removed(&mut self, entity_ref: EntityRef) {
        self.added.remove(&entity_ref);
        self.updated.remove(&entity_ref);
        self.removed.insert(entity_ref);
    }

    fn record_updated(&mut self, entity_ref: EntityRef) {
        if self.added.contains(&entity_ref) || self.removed.contains(&entity_ref) {
            return;
        }
        self.updated.insert(entity_ref);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta {
            added,
            removed,
            updated,
        }
    }
}

pub fn apply_ops(bot: &mut Bot, base_rev: u64, ops: &[Op]) -> Result<ApplyResult, ApplyError> {
    let current_rev = bot.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict {
            base_rev,
            current_rev,
        });
    }

    if ops.is_empty() {
        return Ok(ApplyResult {
            new_rev: current_rev,
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut new_graph = bot.graph().clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        match op {
            Op::Step(step_op) => apply_step_op(&mut new_graph, step_op, &mut delta)?,
            Op::Block(block_op) => apply_block_op(&mut new_graph, block_op, &mut delta)?,
            Op::Edge(edge_op) => apply_edge_op(&mut new_graph, edge_op, &mut delta)?,
            Op::Item(item_op) => apply_item_op(&mut new_graph, item_op, &mut delta)?,
        }
    }

    bot.set_graph(new_graph);
    bot.bump_rev();
    debug_assert_eq!(bot.validate(), Ok(()));
    let new_rev = bot.rev();

    Ok(ApplyResult {
        new_rev,
        applied: ops.len(),
        delta: delta.finish(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    Conflict {
        base_rev: u64,
        current_rev: u64,
    },
    AlreadyExists {
        kind: EntityKind,
        id: String,
    },
    NotFound {
        kind: EntityKind,
        id: String,
    },
    MissingBlock {
        block_id: BlockId,
    },
    MissingStep {
        step_id: StepId,
    },
    PatchMismatch {
        step_id: StepId,
        source: StepPatchMismatch,
    },
    NotChoiceInput {
        step_id: StepId,
    },
}

impl ApplyError {
    fn already_exists(kind: EntityKind, id: &impl fmt::Display) -> Self {
        Self::AlreadyExists {
            kind,
            id: id.to_string(),
        }
    }

    fn not_found(kind: EntityKind, id: &impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict {
                base_rev,
                current_rev,
            } => {
                write!(
                    f,
                    "stale base_rev (base_rev={base_rev}, current_rev={current_rev})"
                )
            }
            Self::AlreadyExists { kind, id } => {
                write!(f, "{kind} already exists (id={id})")
            }
            Self::NotFound { kind, id } => write!(f, "{kind} not found (id={id})"),
            Self::MissingBlock { block_id } => write!(f, "block not found (id={block_id})"),
            Self::MissingStep { step_id } => write!(f, "step not found (id={step_id})"),
            Self::PatchMismatch { step_id, source } => {
                write!(f, "cannot patch step {step_id}: {source}")
            }
            Self::NotChoiceInput { step_id } => {
                write!(f, "step {step_id} is not a choice input")
            }
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PatchMismatch { source, .. } => Some(source),
            _ => None,
        }
    }
}

// Extracted op-application implementation for step/block/edge/item mutations.
include!("ops_impl.rs");
