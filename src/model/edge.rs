// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{BlockId, ChoiceItemId, EdgeId, StepId};

/// Where an edge leaves the flow graph.
///
/// `item_id` is set when the edge leaves a single choice item instead of the
/// step as a whole. A source endpoint carries at most one outgoing edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeSource {
    block_id: BlockId,
    step_id: StepId,
    item_id: Option<ChoiceItemId>,
}

impl EdgeSource {
    pub fn step(block_id: BlockId, step_id: StepId) -> Self {
        Self {
            block_id,
            step_id,
            item_id: None,
        }
    }

    pub fn item(block_id: BlockId, step_id: StepId, item_id: ChoiceItemId) -> Self {
        Self {
            block_id,
            step_id,
            item_id: Some(item_id),
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn step_id(&self) -> &StepId {
        &self.step_id
    }

    pub fn item_id(&self) -> Option<&ChoiceItemId> {
        self.item_id.as_ref()
    }
}

/// Where an edge lands: a block, optionally a specific step inside it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeTarget {
    block_id: BlockId,
    step_id: Option<StepId>,
}

impl EdgeTarget {
    pub fn block(block_id: BlockId) -> Self {
        Self {
            block_id,
            step_id: None,
        }
    }

    pub fn step(block_id: BlockId, step_id: StepId) -> Self {
        Self {
            block_id,
            step_id: Some(step_id),
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn step_id(&self) -> Option<&StepId> {
        self.step_id.as_ref()
    }
}

/// A directed flow transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    edge_id: EdgeId,
    from: EdgeSource,
    to: EdgeTarget,
}

impl Edge {
    pub fn new(edge_id: EdgeId, from: EdgeSource, to: EdgeTarget) -> Self {
        Self { edge_id, from, to }
    }

    pub fn edge_id(&self) -> &EdgeId {
        &self.edge_id
    }

    pub fn from(&self) -> &EdgeSource {
        &self.from
    }

    pub fn to(&self) -> &EdgeTarget {
        &self.to
    }

    pub fn set_to(&mut self, to: EdgeTarget) {
        self.to = to;
    }
}

/// Partial edge update. Only the target is re-routable; re-sourcing an edge
/// is modeled as delete + create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgePatch {
    pub to: Option<EdgeTarget>,
}
