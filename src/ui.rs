// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Display labels for step types.
//!
//! Pure presentation data for the builder sidebar and step chips; the
//! rendering layer decides how captions and tooltips are shown.

use crate::model::{
    BubbleStepType, InputStepType, IntegrationStepType, LogicStepType, StepType,
};

/// A short caption, plus a tooltip where the caption abbreviates the full
/// service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTypeLabel {
    caption: &'static str,
    tooltip: Option<&'static str>,
}

impl StepTypeLabel {
    const fn caption_only(caption: &'static str) -> Self {
        Self {
            caption,
            tooltip: None,
        }
    }

    const fn with_tooltip(caption: &'static str, tooltip: &'static str) -> Self {
        Self {
            caption,
            tooltip: Some(tooltip),
        }
    }

    pub fn caption(&self) -> &'static str {
        self.caption
    }

    pub fn tooltip(&self) -> Option<&'static str> {
        self.tooltip
    }
}

/// The label for a step type; `None` renders nothing (the start step has no
/// chip). Total and side-effect free.
pub fn step_type_label(step_type: StepType) -> Option<StepTypeLabel> {
    let label = match step_type {
        StepType::Start => return None,
        StepType::Bubble(BubbleStepType::Text) | StepType::Input(InputStepType::Text) => {
            StepTypeLabel::caption_only("Text")
        }
        StepType::Bubble(BubbleStepType::Image) => StepTypeLabel::caption_only("Image"),
        StepType::Bubble(BubbleStepType::Video) => StepTypeLabel::caption_only("Video"),
        StepType::Input(InputStepType::Number) => StepTypeLabel::caption_only("Number"),
        StepType::Input(InputStepType::Email) => StepTypeLabel::caption_only("Email"),
        StepType::Input(InputStepType::Url) => StepTypeLabel::caption_only("Website"),
        StepType::Input(InputStepType::Date) => StepTypeLabel::caption_only("Date"),
        StepType::Input(InputStepType::Phone) => StepTypeLabel::caption_only("Phone"),
        StepType::Input(InputStepType::Choice) => StepTypeLabel::caption_only("Button"),
        StepType::Logic(LogicStepType::SetVariable) => {
            StepTypeLabel::caption_only("Set variable")
        }
        StepType::Logic(LogicStepType::Condition) => StepTypeLabel::caption_only("Condition"),
        StepType::Logic(LogicStepType::Redirect) => StepTypeLabel::caption_only("Redirect"),
        StepType::Integration(IntegrationStepType::GoogleSheets) => {
            StepTypeLabel::with_tooltip("Sheets", "Google Sheets")
        }
        StepType::Integration(IntegrationStepType::GoogleAnalytics) => {
            StepTypeLabel::with_tooltip("Analytics", "Google Analytics")
        }
        StepType::Integration(IntegrationStepType::Webhook) => {
            StepTypeLabel::caption_only("Webhook")
        }
        StepType::Integration(IntegrationStepType::Email) => StepTypeLabel::caption_only("Email"),
    };

    Some(label)
}
