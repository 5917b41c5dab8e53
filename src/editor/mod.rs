// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Copy-on-write editing facade.
//!
//! The editor owns the published document as an `Arc` snapshot. Every
//! action clones it, applies its ops transactionally, and republishes on
//! success; readers holding earlier snapshots never observe a partially
//! applied change, and a failed action leaves the published state
//! untouched.

use std::sync::Arc;

use crate::model::{
    Block, BlockId, BlockPatch, Bot, ChoiceItem, ChoiceItemId, ChoiceItemPatch, Coordinates,
    Edge, EdgeId, EdgePatch, EdgeSource, EdgeTarget, Step, StepId, StepPatch, StepPayload,
    StepType,
};
use crate::ops::{apply_ops, ApplyError, ApplyResult, BlockOp, EdgeOp, ItemOp, Op, StepOp};

/// The step factory: a fresh step of the given type, bound to its block,
/// with the variant's default payload (a choice input starts with an empty
/// item list).
pub fn new_step(step_id: StepId, block_id: BlockId, step_type: StepType) -> Step {
    Step::new(step_id, block_id, StepPayload::default_for(step_type))
}

/// Input to step creation: a bare type tag resolved through [`new_step`],
/// or a fully formed step (as when re-attaching the detached half of a
/// move).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewStep {
    OfType(StepType),
    Prebuilt(Step),
}

/// Monotonic per-kind id source, probed against the live document so fresh
/// ids never collide with ids already present (e.g. from a loaded file).
#[derive(Debug, Clone, Default)]
struct IdGen {
    next_block: u64,
    next_step: u64,
    next_edge: u64,
    next_item: u64,
}

impl IdGen {
    fn fresh_block_id(&mut self, bot: &Bot) -> BlockId {
        loop {
            self.next_block = self.next_block.saturating_add(1);
            let candidate =
                BlockId::new(format!("b:{}", self.next_block)).expect("generated id token");
            if !bot.graph().blocks().contains(&candidate) {
                return candidate;
            }
        }
    }

    fn fresh_step_id(&mut self, bot: &Bot) -> StepId {
        loop {
            self.next_step = self.next_step.saturating_add(1);
            let candidate =
                StepId::new(format!("s:{}", self.next_step)).expect("generated id token");
            if !bot.graph().steps().contains(&candidate) {
                return candidate;
            }
        }
    }

    fn fresh_edge_id(&mut self, bot: &Bot) -> EdgeId {
        loop {
            self.next_edge = self.next_edge.saturating_add(1);
            let candidate =
                EdgeId::new(format!("e:{}", self.next_edge)).expect("generated id token");
            if !bot.graph().edges().contains(&candidate) {
                return candidate;
            }
        }
    }

    fn fresh_item_id(&mut self, bot: &Bot) -> ChoiceItemId {
        loop {
            self.next_item = self.next_item.saturating_add(1);
            let candidate =
                ChoiceItemId::new(format!("c:{}", self.next_item)).expect("generated id token");
            if !bot.graph().choice_items().contains(&candidate) {
                return candidate;
            }
        }
    }
}

pub struct FlowEditor {
    published: Arc<Bot>,
    ids: IdGen,
}

impl FlowEditor {
    pub fn new(bot: Bot) -> Self {
        Self {
            published: Arc::new(bot),
            ids: IdGen::default(),
        }
    }

    /// The current published document. The returned `Arc` stays stable
    /// while further actions republish.
    pub fn snapshot(&self) -> Arc<Bot> {
        Arc::clone(&self.published)
    }

    pub fn bot(&self) -> &Bot {
        &self.published
    }

    pub fn rev(&self) -> u64 {
        self.published.rev()
    }

    fn apply(&mut self, ops: Vec<Op>) -> Result<ApplyResult, ApplyError> {
        let mut draft = Bot::clone(&self.published);
        let result = apply_ops(&mut draft, self.published.rev(), &ops)?;
        self.published = Arc::new(draft);
        Ok(result)
    }

    fn resolve_new_step(&mut self, block_id: &BlockId, step: NewStep) -> Step {
        match step {
            NewStep::OfType(step_type) => {
                let step_id = self.ids.fresh_step_id(&self.published);
                new_step(step_id, block_id.clone(), step_type)
            }
            NewStep::Prebuilt(step) => step,
        }
    }

    /// Creates (or re-attaches) a step in `block_id` at `index` (default
    /// front). A choice input with no items gets one default item.
    pub fn create_step(
        &mut self,
        block_id: &BlockId,
        step: NewStep,
        index: Option<usize>,
    ) -> Result<StepId, ApplyError> {
        let step = self.resolve_new_step(block_id, step);
        let step_id = step.step_id().clone();

        let mut ops = Vec::with_capacity(2);
        let needs_default_item =
            step.is_choice_input() && step.choice_item_ids().map_or(false, <[_]>::is_empty);
        ops.push(Op::Step(StepOp::Create {
            block_id: block_id.clone(),
            step,
            index,
        }));
        if needs_default_item {
            let item_id = self.ids.fresh_item_id(&self.published);
            ops.push(Op::Item(ItemOp::Create {
                item: ChoiceItem::new(item_id, step_id.clone()),
                index: None,
            }));
        }

        self.apply(ops)?;
        Ok(step_id)
    }

    pub fn update_step(&mut self, step_id: &StepId, patch: StepPatch) -> Result<(), ApplyError> {
        self.apply(vec![Op::Step(StepOp::Update {
            step_id: step_id.clone(),
            patch,
        })])
        .map(|_| ())
    }

    /// Detaches the step from its owning block without re-attaching it
    /// anywhere; the record itself stays. The canonical drag-and-drop move
    /// is this call followed by [`Self::create_step`] with the same step at
    /// the destination; [`Self::move_step_to`] does both in one
    /// transaction.
    pub fn move_step(&mut self, step_id: &StepId) -> Result<(), ApplyError> {
        self.apply(vec![Op::Step(StepOp::Detach {
            step_id: step_id.clone(),
        })])
        .map(|_| ())
    }

    pub fn move_step_to(
        &mut self,
        step_id: &StepId,
        dest_block_id: &BlockId,
        index: Option<usize>,
    ) -> Result<(), ApplyError> {
        self.apply(vec![Op::Step(StepOp::Move {
            step_id: step_id.clone(),
            dest_block_id: dest_block_id.clone(),
            index,
        })])
        .map(|_| ())
    }

    pub fn delete_step(&mut self, step_id: &StepId) -> Result<(), ApplyError> {
        self.apply(vec![Op::Step(StepOp::Delete {
            step_id: step_id.clone(),
        })])
        .map(|_| ())
    }

    /// Creates a block at `coordinates` seeded with `step` (a block never
    /// starts empty; empty blocks are pruned).
    pub fn create_block(
        &mut self,
        title: impl Into<String>,
        coordinates: Coordinates,
        step: NewStep,
    ) -> Result<(BlockId, StepId), ApplyError> {
        let block_id = self.ids.fresh_block_id(&self.published);
        let block = Block::new(block_id.clone(), title, coordinates);
        let step = self.resolve_new_step(&block_id, step);
        let step_id = step.step_id().clone();

        let mut ops = Vec::with_capacity(3);
        ops.push(Op::Block(BlockOp::Create { block }));
        let needs_default_item =
            step.is_choice_input() && step.choice_item_ids().map_or(false, <[_]>::is_empty);
        ops.push(Op::Step(StepOp::Create {
            block_id: block_id.clone(),
            step,
            index: None,
        }));
        if needs_default_item {
            let item_id = self.ids.fresh_item_id(&self.published);
            ops.push(Op::Item(ItemOp::Create {
                item: ChoiceItem::new(item_id, step_id.clone()),
                index: None,
            }));
        }

        self.apply(ops)?;
        Ok((block_id, step_id))
    }

    pub fn update_block(
        &mut self,
        block_id: &BlockId,
        patch: BlockPatch,
    ) -> Result<(), ApplyError> {
        self.apply(vec![Op::Block(BlockOp::Update {
            block_id: block_id.clone(),
            patch,
        })])
        .map(|_| ())
    }

    pub fn delete_block(&mut self, block_id: &BlockId) -> Result<(), ApplyError> {
        self.apply(vec![Op::Block(BlockOp::Delete {
            block_id: block_id.clone(),
        })])
        .map(|_| ())
    }

    pub fn create_edge(
        &mut self,
        from: EdgeSource,
        to: EdgeTarget,
    ) -> Result<EdgeId, ApplyError> {
        let edge_id = self.ids.fresh_edge_id(&self.published);
        self.apply(vec![Op::Edge(EdgeOp::Create {
            edge: Edge::new(edge_id.clone(), from, to),
        })])?;
        Ok(edge_id)
    }

    pub fn update_edge(&mut self, edge_id: &EdgeId, patch: EdgePatch) -> Result<(), ApplyError> {
        self.apply(vec![Op::Edge(EdgeOp::Update {
            edge_id: edge_id.clone(),
            patch,
        })])
        .map(|_| ())
    }

    pub fn delete_edge(&mut self, edge_id: &EdgeId) -> Result<(), ApplyError> {
        self.apply(vec![Op::Edge(EdgeOp::Delete {
            edge_id: edge_id.clone(),
        })])
        .map(|_| ())
    }

    pub fn create_choice_item(
        &mut self,
        step_id: &StepId,
        content: Option<String>,
        index: Option<usize>,
    ) -> Result<ChoiceItemId, ApplyError> {
        let item_id = self.ids.fresh_item_id(&self.published);
        self.apply(vec![Op::Item(ItemOp::Create {
            item: ChoiceItem::new_with(item_id.clone(), step_id.clone(), content),
            index,
        })])?;
        Ok(item_id)
    }

    pub fn update_choice_item(
        &mut self,
        item_id: &ChoiceItemId,
        patch: ChoiceItemPatch,
    ) -> Result<(), ApplyError> {
        self.apply(vec![Op::Item(ItemOp::Update {
            item_id: item_id.clone(),
            patch,
        })])
        .map(|_| ())
    }

    pub fn delete_choice_item(&mut self, item_id: &ChoiceItemId) -> Result<(), ApplyError> {
        self.apply(vec![Op::Item(ItemOp::Delete {
            item_id: item_id.clone(),
        })])
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::{FlowEditor, NewStep};
    use crate::model::fixtures::bot_linear_flow;
    use crate::model::{BlockId, BubbleStepType, Coordinates, InputStepType, StepId, StepType};

    fn bid(value: &str) -> BlockId {
        BlockId::new(value).expect("block id")
    }

    fn sid(value: &str) -> StepId {
        StepId::new(value).expect("step id")
    }

    #[test]
    fn create_step_from_type_assigns_a_fresh_id_and_stamps_the_block() {
        let mut editor = FlowEditor::new(bot_linear_flow());

        let first = editor
            .create_step(
                &bid("b:hello"),
                NewStep::OfType(StepType::Bubble(BubbleStepType::Image)),
                None,
            )
            .expect("create");
        let second = editor
            .create_step(
                &bid("b:hello"),
                NewStep::OfType(StepType::Bubble(BubbleStepType::Video)),
                None,
            )
            .expect("create");

        assert_ne!(first, second);
        let bot = editor.snapshot();
        let step = bot.graph().steps().get(&first).expect("step");
        assert_eq!(step.block_id(), &bid("b:hello"));
        assert_eq!(step.step_type(), StepType::Bubble(BubbleStepType::Image));
    }

    #[test]
    fn fresh_choice_input_gets_exactly_one_default_item() {
        let mut editor = FlowEditor::new(bot_linear_flow());

        let step_id = editor
            .create_step(
                &bid("b:hello"),
                NewStep::OfType(StepType::Input(InputStepType::Choice)),
                None,
            )
            .expect("create");

        let bot = editor.snapshot();
        let step = bot.graph().steps().get(&step_id).expect("step");
        let item_ids = step.choice_item_ids().expect("choice input");
        assert_eq!(item_ids.len(), 1);
        let item = bot
            .graph()
            .choice_items()
            .get(&item_ids[0])
            .expect("default item");
        assert_eq!(item.step_id(), &step_id);
    }

    #[test]
    fn snapshots_are_isolated_from_later_actions() {
        let mut editor = FlowEditor::new(bot_linear_flow());
        let before = editor.snapshot();

        editor.delete_step(&sid("s:hello")).expect("delete");

        assert!(before.graph().steps().contains(&sid("s:hello")));
        assert!(!editor.bot().graph().steps().contains(&sid("s:hello")));
        assert_eq!(before.rev(), 0);
        assert_eq!(editor.rev(), 1);
    }

    #[test]
    fn failed_action_leaves_the_published_document_untouched() {
        let mut editor = FlowEditor::new(bot_linear_flow());

        editor
            .delete_step(&sid("s:ghost"))
            .expect_err("missing step");

        assert_eq!(editor.rev(), 0);
        assert_eq!(editor.bot(), &bot_linear_flow());
    }

    #[test]
    fn create_block_seeds_it_with_a_step() {
        let mut editor = FlowEditor::new(bot_linear_flow());

        let (block_id, step_id) = editor
            .create_block(
                "Questions",
                Coordinates::new(720, 0),
                NewStep::OfType(StepType::Input(InputStepType::Text)),
            )
            .expect("create block");

        let bot = editor.snapshot();
        let block = bot.graph().blocks().get(&block_id).expect("block");
        assert_eq!(block.title(), "Questions");
        assert_eq!(block.step_ids(), &[step_id]);
    }
}
