// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Step/block/edge/item mutation implementation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_step_op(
    graph: &mut BotGraph,
    op: &StepOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        StepOp::Create {
            block_id,
            step,
            index,
        } => {
            let step_id = step.step_id().clone();
            let already_registered = graph.steps().contains(&step_id);
            if already_registered {
                // Re-attaching a detached step is the second half of the
                // two-call move protocol; a step still listed somewhere is a
                // genuine duplicate.
                let listed = graph
                    .blocks()
                    .values()
                    .any(|block| block.contains_step_id(&step_id));
                if listed {
                    return Err(ApplyError::already_exists(EntityKind::Step, &step_id));
                }
            }
            if !graph.blocks().contains(block_id) {
                return Err(ApplyError::MissingBlock {
                    block_id: block_id.clone(),
                });
            }

            let mut step = step.clone();
            step.set_block_id(block_id.clone());
            if already_registered {
                *graph
                    .steps_mut()
                    .get_mut(&step_id)
                    .expect("step presence checked above") = step;
                delta.record_updated(EntityRef::step(&step_id));
            } else {
                graph.steps_mut().push(step_id.clone(), step);
                delta.record_added(EntityRef::step(&step_id));
            }

            let block = graph
                .blocks_mut()
                .get_mut(block_id)
                .expect("block existence checked above");
            block.insert_step_id(step_id.clone(), *index);
            delta.record_updated(EntityRef::block(block_id));
            prune_empty_blocks(graph, delta);
            Ok(())
        }
        StepOp::Update { step_id, patch } => {
            let Some(step) = graph.steps_mut().get_mut(step_id) else {
                return Err(ApplyError::not_found(EntityKind::Step, step_id));
            };
            step.apply_patch(patch)
                .map_err(|source| ApplyError::PatchMismatch {
                    step_id: step_id.clone(),
                    source,
                })?;
            delta.record_updated(EntityRef::step(step_id));
            Ok(())
        }
        StepOp::Detach { step_id } => {
            if !graph.steps().contains(step_id) {
                return Err(ApplyError::not_found(EntityKind::Step, step_id));
            }
            detach_step(graph, step_id, delta);
            Ok(())
        }
        StepOp::Move {
            step_id,
            dest_block_id,
            index,
        } => {
            if !graph.steps().contains(step_id) {
                return Err(ApplyError::not_found(EntityKind::Step, step_id));
            }
            if !graph.blocks().contains(dest_block_id) {
                return Err(ApplyError::MissingBlock {
                    block_id: dest_block_id.clone(),
                });
            }

            detach_step(graph, step_id, delta);
            graph
                .steps_mut()
                .get_mut(step_id)
                .expect("step existence checked above")
                .set_block_id(dest_block_id.clone());
            graph
                .blocks_mut()
                .get_mut(dest_block_id)
                .expect("block existence checked above")
                .insert_step_id(step_id.clone(), *index);
            delta.record_updated(EntityRef::step(step_id));
            delta.record_updated(EntityRef::block(dest_block_id));
            prune_empty_blocks(graph, delta);
            Ok(())
        }
        StepOp::Delete { step_id } => {
            if !graph.steps().contains(step_id) {
                return Err(ApplyError::not_found(EntityKind::Step, step_id));
            }
            delete_step_cascade(graph, step_id, delta);
            Ok(())
        }
    }
}

fn apply_block_op(
    graph: &mut BotGraph,
    op: &BlockOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        BlockOp::Create { block } => {
            let block_id = block.block_id().clone();
            if graph.blocks().contains(&block_id) {
                return Err(ApplyError::already_exists(EntityKind::Block, &block_id));
            }
            graph.blocks_mut().push(block_id.clone(), block.clone());
            delta.record_added(EntityRef::block(&block_id));
            Ok(())
        }
        BlockOp::Update { block_id, patch } => {
            let Some(block) = graph.blocks_mut().get_mut(block_id) else {
                return Err(ApplyError::not_found(EntityKind::Block, block_id));
            };
            block.apply_patch(patch);
            delta.record_updated(EntityRef::block(block_id));
            Ok(())
        }
        BlockOp::Delete { block_id } => {
            let Some(block) = graph.blocks().get(block_id) else {
                return Err(ApplyError::not_found(EntityKind::Block, block_id));
            };
            let step_ids = block.step_ids().to_vec();
            for step_id in &step_ids {
                delete_step_cascade(graph, step_id, delta);
            }
            remove_edges_touching_block(graph, block_id, delta);
            graph.blocks_mut().remove(block_id);
            delta.record_removed(EntityRef::block(block_id));
            Ok(())
        }
    }
}

fn apply_edge_op(
    graph: &mut BotGraph,
    op: &EdgeOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        EdgeOp::Create { edge } => {
            let edge_id = edge.edge_id().clone();
            if graph.edges().contains(&edge_id) {
                return Err(ApplyError::already_exists(EntityKind::Edge, &edge_id));
            }
            validate_edge_source(graph, edge.from())?;
            validate_edge_target(graph, edge.to())?;

            let displaced = graph
                .edges()
                .iter()
                .filter(|(_, existing)| existing.from() == edge.from())
                .map(|(existing_id, _)| existing_id.clone())
                .collect::<Vec<_>>();
            for displaced_id in displaced {
                graph.edges_mut().remove(&displaced_id);
                delta.record_removed(EntityRef::edge(&displaced_id));
            }

            graph.edges_mut().push(edge_id.clone(), edge.clone());
            delta.record_added(EntityRef::edge(&edge_id));
            Ok(())
        }
        EdgeOp::Update { edge_id, patch } => {
            if !graph.edges().contains(edge_id) {
                return Err(ApplyError::not_found(EntityKind::Edge, edge_id));
            }
            if let Some(to) = &patch.to {
                validate_edge_target(graph, to)?;
                graph
                    .edges_mut()
                    .get_mut(edge_id)
                    .expect("edge presence checked above")
                    .set_to(to.clone());
            }
            delta.record_updated(EntityRef::edge(edge_id));
            Ok(())
        }
        EdgeOp::Delete { edge_id } => {
            if graph.edges_mut().remove(edge_id).is_none() {
                return Err(ApplyError::not_found(EntityKind::Edge, edge_id));
            }
            delta.record_removed(EntityRef::edge(edge_id));
            Ok(())
        }
    }
}

fn apply_item_op(
    graph: &mut BotGraph,
    op: &ItemOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        ItemOp::Create { item, index } => {
            let item_id = item.item_id().clone();
            if graph.choice_items().contains(&item_id) {
                return Err(ApplyError::already_exists(EntityKind::ChoiceItem, &item_id));
            }
            let step_id = item.step_id().clone();
            {
                let Some(owner) = graph.steps_mut().get_mut(&step_id) else {
                    return Err(ApplyError::MissingStep { step_id });
                };
                let Some(item_ids) = owner.choice_item_ids_mut() else {
                    return Err(ApplyError::NotChoiceInput { step_id });
                };
                let index = index.unwrap_or(item_ids.len()).min(item_ids.len());
                item_ids.insert(index, item_id.clone());
            }
            graph.choice_items_mut().push(item_id.clone(), item.clone());
            delta.record_added(EntityRef::choice_item(&item_id));
            delta.record_updated(EntityRef::step(&step_id));
            Ok(())
        }
        ItemOp::Update { item_id, patch } => {
            let Some(item) = graph.choice_items_mut().get_mut(item_id) else {
                return Err(ApplyError::not_found(EntityKind::ChoiceItem, item_id));
            };
            item.apply_patch(patch);
            delta.record_updated(EntityRef::choice_item(item_id));
            Ok(())
        }
        ItemOp::Delete { item_id } => {
            if !remove_choice_item(graph, item_id, delta) {
                return Err(ApplyError::not_found(EntityKind::ChoiceItem, item_id));
            }
            Ok(())
        }
    }
}

/// Removes the single listing of `step_id` from the block it is stamped
/// with. The step record stays; this is the detach half of a move.
fn detach_step(graph: &mut BotGraph, step_id: &StepId, delta: &mut DeltaBuilder) {
    let Some(step) = graph.steps().get(step_id) else {
        return;
    };
    let block_id = step.block_id().clone();
    if let Some(block) = graph.blocks_mut().get_mut(&block_id) {
        if block.remove_step_id(step_id) {
            delta.record_updated(EntityRef::block(&block_id));
        }
    }
}

/// Full step removal. Cascade order is load-bearing: items and edges key
/// off the step's current fields, so they go before the record itself.
fn delete_step_cascade(graph: &mut BotGraph, step_id: &StepId, delta: &mut DeltaBuilder) {
    let Some(step) = graph.steps().get(step_id) else {
        return;
    };
    let block_id = step.block_id().clone();
    let item_ids = step
        .choice_item_ids()
        .map(<[ChoiceItemId]>::to_vec)
        .unwrap_or_default();

    for item_id in &item_ids {
        remove_choice_item(graph, item_id, delta);
    }
    remove_edges_leaving_step(graph, step_id, delta);
    if let Some(block) = graph.blocks_mut().get_mut(&block_id) {
        if block.remove_step_id(step_id) {
            delta.record_updated(EntityRef::block(&block_id));
        }
    }
    graph.steps_mut().remove(step_id);
    delta.record_removed(EntityRef::step(step_id));
}

/// Removes one choice item: edges leaving it, its listing in the owning
/// step, then the record. Returns whether the item existed.
fn remove_choice_item(
    graph: &mut BotGraph,
    item_id: &ChoiceItemId,
    delta: &mut DeltaBuilder,
) -> bool {
    let Some(item) = graph.choice_items().get(item_id) else {
        return false;
    };
    let owner_id = item.step_id().clone();

    let leaving = graph
        .edges()
        .iter()
        .filter(|(_, edge)| edge.from().item_id() == Some(item_id))
        .map(|(edge_id, _)| edge_id.clone())
        .collect::<Vec<_>>();
    for edge_id in leaving {
        graph.edges_mut().remove(&edge_id);
        delta.record_removed(EntityRef::edge(&edge_id));
    }

    if let Some(owner) = graph.steps_mut().get_mut(&owner_id) {
        if let Some(item_ids) = owner.choice_item_ids_mut() {
            if let Some(index) = item_ids.iter().position(|id| id == item_id) {
                item_ids.remove(index);
                delta.record_updated(EntityRef::step(&owner_id));
            }
        }
    }

    graph.choice_items_mut().remove(item_id);
    delta.record_removed(EntityRef::choice_item(item_id));
    true
}

fn remove_edges_leaving_step(graph: &mut BotGraph, step_id: &StepId, delta: &mut DeltaBuilder) {
    let leaving = graph
        .edges()
        .iter()
        .filter(|(_, edge)| edge.from().step_id() == step_id)
        .map(|(edge_id, _)| edge_id.clone())
        .collect::<Vec<_>>();
    for edge_id in leaving {
        graph.edges_mut().remove(&edge_id);
        delta.record_removed(EntityRef::edge(&edge_id));
    }
}

fn remove_edges_touching_block(graph: &mut BotGraph, block_id: &BlockId, delta: &mut DeltaBuilder) {
    let touching = graph
        .edges()
        .iter()
        .filter(|(_, edge)| {
            edge.from().block_id() == block_id || edge.to().block_id() == block_id
        })
        .map(|(edge_id, _)| edge_id.clone())
        .collect::<Vec<_>>();
    for edge_id in touching {
        graph.edges_mut().remove(&edge_id);
        delta.record_removed(EntityRef::edge(&edge_id));
    }
}

/// Drops every block whose step list is empty, together with edges touching
/// it. Runs after step create/move and block-create transactions.
fn prune_empty_blocks(graph: &mut BotGraph, delta: &mut DeltaBuilder) {
    let empty = graph
        .blocks()
        .iter()
        .filter(|(_, block)| block.is_empty())
        .map(|(block_id, _)| block_id.clone())
        .collect::<Vec<_>>();
    for block_id in empty {
        remove_edges_touching_block(graph, &block_id, delta);
        graph.blocks_mut().remove(&block_id);
        delta.record_removed(EntityRef::block(&block_id));
    }
}

fn validate_edge_source(graph: &BotGraph, from: &EdgeSource) -> Result<(), ApplyError> {
    if !graph.blocks().contains(from.block_id()) {
        return Err(ApplyError::MissingBlock {
            block_id: from.block_id().clone(),
        });
    }
    let Some(step) = graph.steps().get(from.step_id()) else {
        return Err(ApplyError::MissingStep {
            step_id: from.step_id().clone(),
        });
    };
    if let Some(item_id) = from.item_id() {
        let owned = step
            .choice_item_ids()
            .map_or(false, |ids| ids.iter().any(|id| id == item_id));
        if !owned {
            return Err(ApplyError::not_found(EntityKind::ChoiceItem, item_id));
        }
    }
    Ok(())
}

fn validate_edge_target(graph: &BotGraph, to: &EdgeTarget) -> Result<(), ApplyError> {
    if !graph.blocks().contains(to.block_id()) {
        return Err(ApplyError::MissingBlock {
            block_id: to.block_id().clone(),
        });
    }
    if let Some(step_id) = to.step_id() {
        if !graph.steps().contains(step_id) {
            return Err(ApplyError::MissingStep {
                step_id: step_id.clone(),
            });
        }
    }
    Ok(())
}
