// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::block::{Block, Coordinates};
use super::bot::Bot;
use super::choice_item::ChoiceItem;
use super::edge::{Edge, EdgeSource, EdgeTarget};
use super::ids::{BlockId, BotId, ChoiceItemId, EdgeId, StepId};
use super::step::{Step, StepPayload};

fn bid(value: &str) -> BlockId {
    BlockId::new(value).expect("block id")
}

fn sid(value: &str) -> StepId {
    StepId::new(value).expect("step id")
}

fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

fn cid(value: &str) -> ChoiceItemId {
    ChoiceItemId::new(value).expect("item id")
}

fn push_block(bot: &mut Bot, block_id: &BlockId, title: &str, x: i32, y: i32) {
    bot.graph_mut().blocks_mut().push(
        block_id.clone(),
        Block::new(block_id.clone(), title, Coordinates::new(x, y)),
    );
}

fn push_step(bot: &mut Bot, block_id: &BlockId, step_id: &StepId, payload: StepPayload) {
    bot.graph_mut().steps_mut().push(
        step_id.clone(),
        Step::new(step_id.clone(), block_id.clone(), payload),
    );
    let block = bot
        .graph_mut()
        .blocks_mut()
        .get_mut(block_id)
        .expect("fixture block");
    let end = block.step_ids().len();
    block.insert_step_id(step_id.clone(), Some(end));
}

/// Start block, a greeting block with a choice input (two items), and a
/// closing block; edges wired start -> greeting, yes-item -> closing.
pub(crate) fn bot_linear_flow() -> Bot {
    let mut bot = Bot::new(BotId::new("bot:fixture").expect("bot id"), "Fixture");

    let b_start = bid("b:start");
    let b_hello = bid("b:hello");
    let b_done = bid("b:done");
    push_block(&mut bot, &b_start, "Start", 0, 0);
    push_block(&mut bot, &b_hello, "Greeting", 240, 0);
    push_block(&mut bot, &b_done, "Closing", 480, 0);

    let s_start = sid("s:start");
    let s_hello = sid("s:hello");
    let s_choice = sid("s:choice");
    let s_done = sid("s:done");
    push_step(&mut bot, &b_start, &s_start, StepPayload::Start);
    push_step(
        &mut bot,
        &b_hello,
        &s_hello,
        StepPayload::TextBubble {
            content: "Hi there!".to_owned(),
        },
    );
    let c_yes = cid("c:yes");
    let c_no = cid("c:no");
    push_step(
        &mut bot,
        &b_hello,
        &s_choice,
        StepPayload::ChoiceInput {
            item_ids: vec![c_yes.clone(), c_no.clone()],
            is_multiple: false,
            button_label: "Send".to_owned(),
        },
    );
    push_step(
        &mut bot,
        &b_done,
        &s_done,
        StepPayload::TextBubble {
            content: "Bye!".to_owned(),
        },
    );

    bot.graph_mut().choice_items_mut().push(
        c_yes.clone(),
        ChoiceItem::new_with(c_yes.clone(), s_choice.clone(), Some("Yes".to_owned())),
    );
    bot.graph_mut().choice_items_mut().push(
        c_no.clone(),
        ChoiceItem::new_with(c_no.clone(), s_choice.clone(), Some("No".to_owned())),
    );

    bot.graph_mut().edges_mut().push(
        eid("e:start"),
        Edge::new(
            eid("e:start"),
            EdgeSource::step(b_start.clone(), s_start.clone()),
            EdgeTarget::block(b_hello.clone()),
        ),
    );
    bot.graph_mut().edges_mut().push(
        eid("e:yes"),
        Edge::new(
            eid("e:yes"),
            EdgeSource::item(b_hello.clone(), s_choice.clone(), c_yes),
            EdgeTarget::block(b_done.clone()),
        ),
    );

    debug_assert_eq!(bot.validate(), Ok(()));
    bot
}

#[cfg(test)]
mod tests {
    use super::bot_linear_flow;

    #[test]
    fn linear_flow_fixture_is_valid() {
        let bot = bot_linear_flow();
        assert_eq!(bot.validate(), Ok(()));
        assert_eq!(bot.graph().blocks().len(), 3);
        assert_eq!(bot.graph().steps().len(), 4);
        assert_eq!(bot.graph().edges().len(), 2);
        assert_eq!(bot.graph().choice_items().len(), 2);
    }
}
