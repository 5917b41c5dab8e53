// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{ChoiceItemId, StepId};

/// One selectable option owned by a choice-input step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceItem {
    item_id: ChoiceItemId,
    step_id: StepId,
    content: Option<String>,
}

impl ChoiceItem {
    pub fn new(item_id: ChoiceItemId, step_id: StepId) -> Self {
        Self {
            item_id,
            step_id,
            content: None,
        }
    }

    pub fn new_with(item_id: ChoiceItemId, step_id: StepId, content: Option<String>) -> Self {
        Self {
            item_id,
            step_id,
            content,
        }
    }

    pub fn item_id(&self) -> &ChoiceItemId {
        &self.item_id
    }

    pub fn step_id(&self) -> &StepId {
        &self.step_id
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content<T: Into<String>>(&mut self, content: Option<T>) {
        self.content = content.map(Into::into);
    }
}

/// Partial choice-item update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceItemPatch {
    pub content: Option<String>,
}

impl ChoiceItem {
    pub fn apply_patch(&mut self, patch: &ChoiceItemPatch) {
        if patch.content.is_some() {
            self.content = patch.content.clone();
        }
    }
}
