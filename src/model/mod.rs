// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core document model.
//!
//! A bot holds blocks, steps, edges and choice items as normalized,
//! insertion-ordered collections.

pub mod block;
pub mod bot;
pub mod choice_item;
pub mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod step;

pub use block::{Block, BlockPatch, Coordinates};
pub use bot::{Bot, BotGraph, BotInvariantError, EntityKind, EntityTable};
pub use choice_item::{ChoiceItem, ChoiceItemPatch};
pub use edge::{Edge, EdgePatch, EdgeSource, EdgeTarget};
pub use ids::{
    BlockId, BotId, ChoiceItemId, EdgeId, Id, IdError, StepId, VariableId,
};
pub use step::{
    BubbleStepType, Comparison, ComparisonOperator, DateLabels, InputLabels, InputStepType,
    IntegrationStepType, LogicStepType, LogicalOperator, ParseStepTypeError, Step, StepFamily,
    StepPatch, StepPatchMismatch, StepPayload, StepType,
};
