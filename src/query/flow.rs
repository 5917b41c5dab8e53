// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::model::{BlockId, Bot, EdgeId, StepId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockDegree {
    pub in_degree: u64,
    pub out_degree: u64,
}

/// In/out edge counts per block, counting every block once.
pub fn block_degrees(bot: &Bot) -> BTreeMap<BlockId, BlockDegree> {
    let mut degrees: BTreeMap<BlockId, BlockDegree> = BTreeMap::new();
    for block_id in bot.graph().blocks().ids() {
        degrees.entry(block_id.clone()).or_default();
    }

    for edge in bot.graph().edges().values() {
        let from_degree = degrees.entry(edge.from().block_id().clone()).or_default();
        from_degree.out_degree = from_degree.out_degree.saturating_add(1);

        let to_degree = degrees.entry(edge.to().block_id().clone()).or_default();
        to_degree.in_degree = to_degree.in_degree.saturating_add(1);
    }

    degrees
}

/// Steps registered in the flat index but listed by no block, in index
/// order. A detached step waiting for re-attachment shows up here.
pub fn orphan_steps(bot: &Bot) -> Vec<StepId> {
    let mut listed: BTreeSet<&StepId> = BTreeSet::new();
    for block in bot.graph().blocks().values() {
        listed.extend(block.step_ids());
    }

    bot.graph()
        .steps()
        .ids()
        .iter()
        .filter(|step_id| !listed.contains(step_id))
        .cloned()
        .collect()
}

/// Edges whose endpoints name entities missing from the document, in index
/// order. Ops never produce these; hand-edited files can.
pub fn dangling_edges(bot: &Bot) -> Vec<EdgeId> {
    let graph = bot.graph();
    graph
        .edges()
        .iter()
        .filter(|(_, edge)| {
            let from = edge.from();
            let to = edge.to();
            !graph.blocks().contains(from.block_id())
                || !graph.steps().contains(from.step_id())
                || from
                    .item_id()
                    .is_some_and(|item_id| !graph.choice_items().contains(item_id))
                || !graph.blocks().contains(to.block_id())
                || to
                    .step_id()
                    .is_some_and(|step_id| !graph.steps().contains(step_id))
        })
        .map(|(edge_id, _)| edge_id.clone())
        .collect()
}

/// Blocks with no steps, in index order. Present only between a removal
/// and the next pruning pass.
pub fn empty_blocks(bot: &Bot) -> Vec<BlockId> {
    bot.graph()
        .blocks()
        .iter()
        .filter(|(_, block)| block.is_empty())
        .map(|(block_id, _)| block_id.clone())
        .collect()
}

fn outgoing_adjacency(bot: &Bot) -> BTreeMap<BlockId, Vec<BlockId>> {
    let mut outgoing: BTreeMap<BlockId, BTreeSet<BlockId>> = BTreeMap::new();

    for block_id in bot.graph().blocks().ids() {
        outgoing.entry(block_id.clone()).or_default();
    }

    for edge in bot.graph().edges().values() {
        outgoing
            .entry(edge.from().block_id().clone())
            .or_default()
            .insert(edge.to().block_id().clone());
        outgoing.entry(edge.to().block_id().clone()).or_default();
    }

    outgoing
        .into_iter()
        .map(|(block_id, neighbors)| (block_id, neighbors.into_iter().collect()))
        .collect()
}

/// Blocks reachable from `start` (inclusive) by following edges forward.
pub fn reachable_block_ids(bot: &Bot, start: &BlockId) -> BTreeSet<BlockId> {
    let adjacency = outgoing_adjacency(bot);
    let mut reached: BTreeSet<BlockId> = BTreeSet::new();
    if !adjacency.contains_key(start) {
        return reached;
    }

    let mut queue: VecDeque<BlockId> = VecDeque::new();
    reached.insert(start.clone());
    queue.push_back(start.clone());

    while let Some(block_id) = queue.pop_front() {
        for next_id in adjacency.get(&block_id).into_iter().flatten() {
            if reached.insert(next_id.clone()) {
                queue.push_back(next_id.clone());
            }
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{
        block_degrees, dangling_edges, empty_blocks, orphan_steps, reachable_block_ids,
    };
    use crate::model::fixtures::bot_linear_flow;
    use crate::model::{Block, BlockId, Coordinates, StepId};
    use crate::ops::{apply_ops, Op, StepOp};

    fn bid(value: &str) -> BlockId {
        BlockId::new(value).expect("block id")
    }

    fn sid(value: &str) -> StepId {
        StepId::new(value).expect("step id")
    }

    #[test]
    fn degrees_count_edges_per_block() {
        let bot = bot_linear_flow();
        let degrees = block_degrees(&bot);

        let start = degrees.get(&bid("b:start")).expect("b:start");
        assert_eq!((start.in_degree, start.out_degree), (0, 1));
        let hello = degrees.get(&bid("b:hello")).expect("b:hello");
        assert_eq!((hello.in_degree, hello.out_degree), (1, 1));
        let done = degrees.get(&bid("b:done")).expect("b:done");
        assert_eq!((done.in_degree, done.out_degree), (1, 0));
    }

    #[test]
    fn detached_step_shows_up_as_an_orphan() {
        let mut bot = bot_linear_flow();
        assert!(orphan_steps(&bot).is_empty());

        apply_ops(
            &mut bot,
            0,
            &[Op::Step(StepOp::Detach {
                step_id: sid("s:hello"),
            })],
        )
        .expect("detach");

        assert_eq!(orphan_steps(&bot), vec![sid("s:hello")]);
    }

    #[test]
    fn fixture_has_no_dangling_edges() {
        let bot = bot_linear_flow();
        assert!(dangling_edges(&bot).is_empty());
    }

    #[test]
    fn manually_added_empty_block_is_reported() {
        let mut bot = bot_linear_flow();
        assert!(empty_blocks(&bot).is_empty());

        let block_id = bid("b:limbo");
        bot.graph_mut().blocks_mut().push(
            block_id.clone(),
            Block::new(block_id.clone(), "Limbo", Coordinates::default()),
        );

        assert_eq!(empty_blocks(&bot), vec![block_id]);
    }

    #[test]
    fn reachability_follows_edges_forward() {
        let bot = bot_linear_flow();

        let reached = reachable_block_ids(&bot, &bid("b:start"));
        let expected: BTreeSet<BlockId> =
            [bid("b:start"), bid("b:hello"), bid("b:done")].into_iter().collect();
        assert_eq!(reached, expected);

        let reached = reachable_block_ids(&bot, &bid("b:done"));
        let expected: BTreeSet<BlockId> = [bid("b:done")].into_iter().collect();
        assert_eq!(reached, expected);

        assert!(reachable_block_ids(&bot, &bid("b:ghost")).is_empty());
    }
}
