// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use triton::model::{
    Block, BlockId, Bot, BotId, ChoiceItem, ChoiceItemId, Coordinates, Edge, EdgeId, EdgeSource,
    EdgeTarget, Step, StepId, StepPayload, StepType,
};
use triton::ops::{apply_ops, ApplyResult, EdgeOp, ItemOp, Op, StepOp};

// Benchmark identity (keep stable):
// - Group name in this file: `ops.apply`
// - Case IDs (the string after the `/`) must remain stable across refactors
//   so results stay comparable over time (e.g. `create_small`,
//   `delete_cascade_large`).
// - If implementations move/deduplicate, update the wiring but do not
//   rename group or case IDs.
fn checksum_apply_result(result: &ApplyResult) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(result.new_rev);
    acc = acc.wrapping_mul(131).wrapping_add(result.applied as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.added.len() as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.updated.len() as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.removed.len() as u64);
    acc
}

fn bid(value: &str) -> BlockId {
    BlockId::new(value).expect("block id")
}

fn sid(value: &str) -> StepId {
    StepId::new(value).expect("step id")
}

/// One block per `blocks`, each holding `steps_per_block` text steps, plus a
/// choice step with `items` items and item edges fanning out to the next
/// block.
fn bench_bot(blocks: usize, steps_per_block: usize, items: usize) -> Bot {
    let mut bot = Bot::new(BotId::new("bot:bench").expect("bot id"), "Bench");

    for b in 0..blocks {
        let block_id = bid(&format!("b:{b:04}"));
        bot.graph_mut().blocks_mut().push(
            block_id.clone(),
            Block::new(block_id.clone(), format!("Block {b}"), Coordinates::new(0, 0)),
        );

        for s in 0..steps_per_block {
            let step_id = sid(&format!("s:{b:04}-{s:04}"));
            bot.graph_mut().steps_mut().push(
                step_id.clone(),
                Step::new(
                    step_id.clone(),
                    block_id.clone(),
                    StepPayload::TextBubble {
                        content: format!("text {b}/{s}"),
                    },
                ),
            );
            let block = bot
                .graph_mut()
                .blocks_mut()
                .get_mut(&block_id)
                .expect("bench block");
            let end = block.step_ids().len();
            block.insert_step_id(step_id, Some(end));
        }

        let choice_id = sid(&format!("s:{b:04}-choice"));
        let item_ids: Vec<ChoiceItemId> = (0..items)
            .map(|i| ChoiceItemId::new(format!("c:{b:04}-{i:04}")).expect("item id"))
            .collect();
        bot.graph_mut().steps_mut().push(
            choice_id.clone(),
            Step::new(
                choice_id.clone(),
                block_id.clone(),
                StepPayload::ChoiceInput {
                    item_ids: item_ids.clone(),
                    is_multiple: false,
                    button_label: "Send".to_owned(),
                },
            ),
        );
        let block = bot
            .graph_mut()
            .blocks_mut()
            .get_mut(&block_id)
            .expect("bench block");
        let end = block.step_ids().len();
        block.insert_step_id(choice_id.clone(), Some(end));

        for (i, item_id) in item_ids.iter().enumerate() {
            bot.graph_mut().choice_items_mut().push(
                item_id.clone(),
                ChoiceItem::new_with(
                    item_id.clone(),
                    choice_id.clone(),
                    Some(format!("Option {i}")),
                ),
            );
            if b + 1 < blocks {
                let edge_id = EdgeId::new(format!("e:{b:04}-{i:04}")).expect("edge id");
                bot.graph_mut().edges_mut().push(
                    edge_id.clone(),
                    Edge::new(
                        edge_id,
                        EdgeSource::item(block_id.clone(), choice_id.clone(), item_id.clone()),
                        EdgeTarget::block(bid(&format!("b:{:04}", b + 1))),
                    ),
                );
            }
        }
    }

    bot
}

fn create_ops(block_id: &BlockId, count: usize) -> Vec<Op> {
    (0..count)
        .map(|i| {
            let step_id = sid(&format!("s:new-{i:05}"));
            Op::Step(StepOp::Create {
                block_id: block_id.clone(),
                step: triton::editor::new_step(
                    step_id,
                    block_id.clone(),
                    StepType::Bubble(triton::model::BubbleStepType::Text),
                ),
                index: Some(i),
            })
        })
        .collect()
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.apply");

    {
        let bot = bench_bot(4, 4, 3);
        let ops = create_ops(&bid("b:0001"), 16);
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function("create_small", |b| {
            b.iter_batched(
                || bot.clone(),
                |mut bot| {
                    let result = apply_ops(&mut bot, 0, black_box(&ops)).expect("apply");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        });
    }

    {
        let bot = bench_bot(32, 8, 6);
        let ops = create_ops(&bid("b:0001"), 64);
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function("create_large", |b| {
            b.iter_batched(
                || bot.clone(),
                |mut bot| {
                    let result = apply_ops(&mut bot, 0, black_box(&ops)).expect("apply");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        });
    }

    {
        let bot = bench_bot(32, 8, 6);
        let ops: Vec<Op> = (0..16)
            .map(|b| {
                Op::Step(StepOp::Delete {
                    step_id: sid(&format!("s:{b:04}-choice")),
                })
            })
            .collect();
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function("delete_cascade_large", |b| {
            b.iter_batched(
                || bot.clone(),
                |mut bot| {
                    let result = apply_ops(&mut bot, 0, black_box(&ops)).expect("apply");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        });
    }

    {
        let bot = bench_bot(32, 8, 6);
        let ops: Vec<Op> = (0..64usize)
            .map(|i| {
                let block = i % 32;
                Op::Item(ItemOp::Create {
                    item: ChoiceItem::new_with(
                        ChoiceItemId::new(format!("c:new-{i:05}")).expect("item id"),
                        sid(&format!("s:{block:04}-choice")),
                        Some(format!("New {i}")),
                    ),
                    index: None,
                })
            })
            .collect();
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function("item_fanout", |b| {
            b.iter_batched(
                || bot.clone(),
                |mut bot| {
                    let result = apply_ops(&mut bot, 0, black_box(&ops)).expect("apply");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        });
    }

    {
        let bot = bench_bot(32, 8, 6);
        let ops: Vec<Op> = (0..31usize)
            .map(|b| {
                Op::Edge(EdgeOp::Create {
                    edge: Edge::new(
                        EdgeId::new(format!("e:new-{b:04}")).expect("edge id"),
                        EdgeSource::step(
                            bid(&format!("b:{b:04}")),
                            sid(&format!("s:{b:04}-0000")),
                        ),
                        EdgeTarget::block(bid(&format!("b:{:04}", b + 1))),
                    ),
                })
            })
            .collect();
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function("edge_rewire", |b| {
            b.iter_batched(
                || bot.clone(),
                |mut bot| {
                    let result = apply_ops(&mut bot, 0, black_box(&ops)).expect("apply");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply);
criterion_main!(benches);
