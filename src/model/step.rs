// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Step AST: one sum type over the four step families plus the start step.
//!
//! Every variant carries only the fields valid for it, so invalid
//! field/variant combinations are unrepresentable. The flat [`StepType`]
//! tag names variants for labels, the step factory, and persistence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::{BlockId, ChoiceItemId, StepId, VariableId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubbleStepType {
    Text,
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputStepType {
    Text,
    Number,
    Email,
    Url,
    Date,
    Phone,
    Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicStepType {
    SetVariable,
    Condition,
    Redirect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrationStepType {
    GoogleSheets,
    GoogleAnalytics,
    Webhook,
    Email,
}

/// The family a step type belongs to, as grouped in the builder sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepFamily {
    Bubble,
    Input,
    Logic,
    Integration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepType {
    Start,
    Bubble(BubbleStepType),
    Input(InputStepType),
    Logic(LogicStepType),
    Integration(IntegrationStepType),
}

impl StepType {
    /// `None` for the start step, which belongs to no draggable family.
    pub fn family(self) -> Option<StepFamily> {
        match self {
            Self::Start => None,
            Self::Bubble(_) => Some(StepFamily::Bubble),
            Self::Input(_) => Some(StepFamily::Input),
            Self::Logic(_) => Some(StepFamily::Logic),
            Self::Integration(_) => Some(StepFamily::Integration),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Bubble(BubbleStepType::Text) => "text",
            Self::Bubble(BubbleStepType::Image) => "image",
            Self::Bubble(BubbleStepType::Video) => "video",
            Self::Input(InputStepType::Text) => "text_input",
            Self::Input(InputStepType::Number) => "number_input",
            Self::Input(InputStepType::Email) => "email_input",
            Self::Input(InputStepType::Url) => "url_input",
            Self::Input(InputStepType::Date) => "date_input",
            Self::Input(InputStepType::Phone) => "phone_input",
            Self::Input(InputStepType::Choice) => "choice_input",
            Self::Logic(LogicStepType::SetVariable) => "set_variable",
            Self::Logic(LogicStepType::Condition) => "condition",
            Self::Logic(LogicStepType::Redirect) => "redirect",
            Self::Integration(IntegrationStepType::GoogleSheets) => "google_sheets",
            Self::Integration(IntegrationStepType::GoogleAnalytics) => "google_analytics",
            Self::Integration(IntegrationStepType::Webhook) => "webhook",
            Self::Integration(IntegrationStepType::Email) => "email",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStepTypeError;

impl fmt::Display for ParseStepTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid step type")
    }
}

impl std::error::Error for ParseStepTypeError {}

impl FromStr for StepType {
    type Err = ParseStepTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "text" => Ok(Self::Bubble(BubbleStepType::Text)),
            "image" => Ok(Self::Bubble(BubbleStepType::Image)),
            "video" => Ok(Self::Bubble(BubbleStepType::Video)),
            "text_input" => Ok(Self::Input(InputStepType::Text)),
            "number_input" => Ok(Self::Input(InputStepType::Number)),
            "email_input" => Ok(Self::Input(InputStepType::Email)),
            "url_input" => Ok(Self::Input(InputStepType::Url)),
            "date_input" => Ok(Self::Input(InputStepType::Date)),
            "phone_input" => Ok(Self::Input(InputStepType::Phone)),
            "choice_input" => Ok(Self::Input(InputStepType::Choice)),
            "set_variable" => Ok(Self::Logic(LogicStepType::SetVariable)),
            "condition" => Ok(Self::Logic(LogicStepType::Condition)),
            "redirect" => Ok(Self::Logic(LogicStepType::Redirect)),
            "google_sheets" => Ok(Self::Integration(IntegrationStepType::GoogleSheets)),
            "google_analytics" => Ok(Self::Integration(IntegrationStepType::GoogleAnalytics)),
            "webhook" => Ok(Self::Integration(IntegrationStepType::Webhook)),
            "email" => Ok(Self::Integration(IntegrationStepType::Email)),
            _ => Err(ParseStepTypeError),
        }
    }
}

/// Button/placeholder texts shared by the free-form input variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLabels {
    pub button: String,
    pub placeholder: String,
}

impl Default for InputLabels {
    fn default() -> Self {
        Self {
            button: "Send".to_owned(),
            placeholder: "Type your answer...".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateLabels {
    pub button: String,
    pub from: String,
    pub to: String,
}

impl Default for DateLabels {
    fn default() -> Self {
        Self {
            button: "Pick a date".to_owned(),
            from: "From:".to_owned(),
            to: "To:".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    #[default]
    Equal,
    NotEqual,
    Contains,
    Greater,
    Less,
    IsSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

/// One clause of a condition step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comparison {
    pub variable_id: Option<VariableId>,
    pub operator: ComparisonOperator,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StepPayload {
    #[serde(rename = "start")]
    Start,
    #[serde(rename = "text")]
    TextBubble { content: String },
    #[serde(rename = "image")]
    ImageBubble { url: Option<String> },
    #[serde(rename = "video")]
    VideoBubble { url: Option<String> },
    #[serde(rename = "text_input")]
    TextInput { labels: InputLabels, is_long: bool },
    #[serde(rename = "number_input")]
    NumberInput {
        labels: InputLabels,
        min: Option<i64>,
        max: Option<i64>,
        step: Option<i64>,
    },
    #[serde(rename = "email_input")]
    EmailInput {
        labels: InputLabels,
        retry_message: Option<String>,
    },
    #[serde(rename = "url_input")]
    UrlInput {
        labels: InputLabels,
        retry_message: Option<String>,
    },
    #[serde(rename = "date_input")]
    DateInput {
        labels: DateLabels,
        is_range: bool,
        has_time: bool,
    },
    #[serde(rename = "phone_input")]
    PhoneInput {
        labels: InputLabels,
        retry_message: Option<String>,
    },
    #[serde(rename = "choice_input")]
    ChoiceInput {
        item_ids: Vec<ChoiceItemId>,
        is_multiple: bool,
        button_label: String,
    },
    #[serde(rename = "set_variable")]
    SetVariable {
        variable_id: Option<VariableId>,
        expression: Option<String>,
    },
    #[serde(rename = "condition")]
    Condition {
        comparisons: Vec<Comparison>,
        logical_operator: LogicalOperator,
    },
    #[serde(rename = "redirect")]
    Redirect {
        url: Option<String>,
        open_in_new_tab: bool,
    },
    #[serde(rename = "google_sheets")]
    GoogleSheets {
        spreadsheet_id: Option<String>,
        sheet_id: Option<String>,
    },
    #[serde(rename = "google_analytics")]
    GoogleAnalytics {
        tracking_id: Option<String>,
        category: Option<String>,
        action: Option<String>,
    },
    #[serde(rename = "webhook")]
    Webhook { url: Option<String> },
    #[serde(rename = "email")]
    SendEmail {
        recipients: Vec<String>,
        subject: Option<String>,
        body: Option<String>,
    },
}

impl StepPayload {
    pub fn step_type(&self) -> StepType {
        match self {
            Self::Start => StepType::Start,
            Self::TextBubble { .. } => StepType::Bubble(BubbleStepType::Text),
            Self::ImageBubble { .. } => StepType::Bubble(BubbleStepType::Image),
            Self::VideoBubble { .. } => StepType::Bubble(BubbleStepType::Video),
            Self::TextInput { .. } => StepType::Input(InputStepType::Text),
            Self::NumberInput { .. } => StepType::Input(InputStepType::Number),
            Self::EmailInput { .. } => StepType::Input(InputStepType::Email),
            Self::UrlInput { .. } => StepType::Input(InputStepType::Url),
            Self::DateInput { .. } => StepType::Input(InputStepType::Date),
            Self::PhoneInput { .. } => StepType::Input(InputStepType::Phone),
            Self::ChoiceInput { .. } => StepType::Input(InputStepType::Choice),
            Self::SetVariable { .. } => StepType::Logic(LogicStepType::SetVariable),
            Self::Condition { .. } => StepType::Logic(LogicStepType::Condition),
            Self::Redirect { .. } => StepType::Logic(LogicStepType::Redirect),
            Self::GoogleSheets { .. } => {
                StepType::Integration(IntegrationStepType::GoogleSheets)
            }
            Self::GoogleAnalytics { .. } => {
                StepType::Integration(IntegrationStepType::GoogleAnalytics)
            }
            Self::Webhook { .. } => StepType::Integration(IntegrationStepType::Webhook),
            Self::SendEmail { .. } => StepType::Integration(IntegrationStepType::Email),
        }
    }

    /// The payload a freshly created step of the given type starts with.
    ///
    /// A choice input starts with an empty item list; the create op
    /// synthesizes the first default item.
    pub fn default_for(step_type: StepType) -> Self {
        match step_type {
            StepType::Start => Self::Start,
            StepType::Bubble(BubbleStepType::Text) => Self::TextBubble {
                content: String::new(),
            },
            StepType::Bubble(BubbleStepType::Image) => Self::ImageBubble { url: None },
            StepType::Bubble(BubbleStepType::Video) => Self::VideoBubble { url: None },
            StepType::Input(InputStepType::Text) => Self::TextInput {
                labels: InputLabels::default(),
                is_long: false,
            },
            StepType::Input(InputStepType::Number) => Self::NumberInput {
                labels: InputLabels::default(),
                min: None,
                max: None,
                step: None,
            },
            StepType::Input(InputStepType::Email) => Self::EmailInput {
                labels: InputLabels {
                    placeholder: "Type your email...".to_owned(),
                    ..InputLabels::default()
                },
                retry_message: None,
            },
            StepType::Input(InputStepType::Url) => Self::UrlInput {
                labels: InputLabels {
                    placeholder: "Type a URL...".to_owned(),
                    ..InputLabels::default()
                },
                retry_message: None,
            },
            StepType::Input(InputStepType::Date) => Self::DateInput {
                labels: DateLabels::default(),
                is_range: false,
                has_time: false,
            },
            StepType::Input(InputStepType::Phone) => Self::PhoneInput {
                labels: InputLabels {
                    placeholder: "Type your phone number...".to_owned(),
                    ..InputLabels::default()
                },
                retry_message: None,
            },
            StepType::Input(InputStepType::Choice) => Self::ChoiceInput {
                item_ids: Vec::new(),
                is_multiple: false,
                button_label: "Send".to_owned(),
            },
            StepType::Logic(LogicStepType::SetVariable) => Self::SetVariable {
                variable_id: None,
                expression: None,
            },
            StepType::Logic(LogicStepType::Condition) => Self::Condition {
                comparisons: Vec::new(),
                logical_operator: LogicalOperator::And,
            },
            StepType::Logic(LogicStepType::Redirect) => Self::Redirect {
                url: None,
                open_in_new_tab: false,
            },
            StepType::Integration(IntegrationStepType::GoogleSheets) => Self::GoogleSheets {
                spreadsheet_id: None,
                sheet_id: None,
            },
            StepType::Integration(IntegrationStepType::GoogleAnalytics) => {
                Self::GoogleAnalytics {
                    tracking_id: None,
                    category: None,
                    action: None,
                }
            }
            StepType::Integration(IntegrationStepType::Webhook) => Self::Webhook { url: None },
            StepType::Integration(IntegrationStepType::Email) => Self::SendEmail {
                recipients: Vec::new(),
                subject: None,
                body: None,
            },
        }
    }
}

/// A single unit of flow content/logic, owned by exactly one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    step_id: StepId,
    block_id: BlockId,
    payload: StepPayload,
}

impl Step {
    pub fn new(step_id: StepId, block_id: BlockId, payload: StepPayload) -> Self {
        Self {
            step_id,
            block_id,
            payload,
        }
    }

    pub fn step_id(&self) -> &StepId {
        &self.step_id
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn set_block_id(&mut self, block_id: BlockId) {
        self.block_id = block_id;
    }

    pub fn step_type(&self) -> StepType {
        self.payload.step_type()
    }

    pub fn payload(&self) -> &StepPayload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut StepPayload {
        &mut self.payload
    }

    pub fn is_choice_input(&self) -> bool {
        matches!(self.payload, StepPayload::ChoiceInput { .. })
    }

    pub fn choice_item_ids(&self) -> Option<&[ChoiceItemId]> {
        match &self.payload {
            StepPayload::ChoiceInput { item_ids, .. } => Some(item_ids),
            _ => None,
        }
    }

    pub fn choice_item_ids_mut(&mut self) -> Option<&mut Vec<ChoiceItemId>> {
        match &mut self.payload {
            StepPayload::ChoiceInput { item_ids, .. } => Some(item_ids),
            _ => None,
        }
    }

    /// Shallow-merges `patch` onto the payload. Unset patch fields keep the
    /// prior value; the step id, owning block, and variant never change.
    pub fn apply_patch(&mut self, patch: &StepPatch) -> Result<(), StepPatchMismatch> {
        apply_step_patch(&mut self.payload, patch)
    }
}

/// Partial payload update for [`Step::apply_patch`].
///
/// There is no patch for the start step; the id and the variant tag are not
/// expressible here at all, which is what keeps them immutable. A choice
/// input's item list is managed by item ops, not patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepPatch {
    TextBubble {
        content: Option<String>,
    },
    ImageBubble {
        url: Option<String>,
    },
    VideoBubble {
        url: Option<String>,
    },
    TextInput {
        labels: Option<InputLabels>,
        is_long: Option<bool>,
    },
    NumberInput {
        labels: Option<InputLabels>,
        min: Option<i64>,
        max: Option<i64>,
        step: Option<i64>,
    },
    EmailInput {
        labels: Option<InputLabels>,
        retry_message: Option<String>,
    },
    UrlInput {
        labels: Option<InputLabels>,
        retry_message: Option<String>,
    },
    DateInput {
        labels: Option<DateLabels>,
        is_range: Option<bool>,
        has_time: Option<bool>,
    },
    PhoneInput {
        labels: Option<InputLabels>,
        retry_message: Option<String>,
    },
    ChoiceInput {
        is_multiple: Option<bool>,
        button_label: Option<String>,
    },
    SetVariable {
        variable_id: Option<VariableId>,
        expression: Option<String>,
    },
    Condition {
        comparisons: Option<Vec<Comparison>>,
        logical_operator: Option<LogicalOperator>,
    },
    Redirect {
        url: Option<String>,
        open_in_new_tab: Option<bool>,
    },
    GoogleSheets {
        spreadsheet_id: Option<String>,
        sheet_id: Option<String>,
    },
    GoogleAnalytics {
        tracking_id: Option<String>,
        category: Option<String>,
        action: Option<String>,
    },
    Webhook {
        url: Option<String>,
    },
    SendEmail {
        recipients: Option<Vec<String>>,
        subject: Option<String>,
        body: Option<String>,
    },
}

impl StepPatch {
    pub fn step_type(&self) -> StepType {
        match self {
            Self::TextBubble { .. } => StepType::Bubble(BubbleStepType::Text),
            Self::ImageBubble { .. } => StepType::Bubble(BubbleStepType::Image),
            Self::VideoBubble { .. } => StepType::Bubble(BubbleStepType::Video),
            Self::TextInput { .. } => StepType::Input(InputStepType::Text),
            Self::NumberInput { .. } => StepType::Input(InputStepType::Number),
            Self::EmailInput { .. } => StepType::Input(InputStepType::Email),
            Self::UrlInput { .. } => StepType::Input(InputStepType::Url),
            Self::DateInput { .. } => StepType::Input(InputStepType::Date),
            Self::PhoneInput { .. } => StepType::Input(InputStepType::Phone),
            Self::ChoiceInput { .. } => StepType::Input(InputStepType::Choice),
            Self::SetVariable { .. } => StepType::Logic(LogicStepType::SetVariable),
            Self::Condition { .. } => StepType::Logic(LogicStepType::Condition),
            Self::Redirect { .. } => StepType::Logic(LogicStepType::Redirect),
            Self::GoogleSheets { .. } => {
                StepType::Integration(IntegrationStepType::GoogleSheets)
            }
            Self::GoogleAnalytics { .. } => {
                StepType::Integration(IntegrationStepType::GoogleAnalytics)
            }
            Self::Webhook { .. } => StepType::Integration(IntegrationStepType::Webhook),
            Self::SendEmail { .. } => StepType::Integration(IntegrationStepType::Email),
        }
    }
}

/// Patch variant does not match the step's payload variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPatchMismatch {
    step: StepType,
    patch: StepType,
}

impl StepPatchMismatch {
    pub fn step(&self) -> StepType {
        self.step
    }

    pub fn patch(&self) -> StepType {
        self.patch
    }
}

impl fmt::Display for StepPatchMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step patch kind mismatch (step is {}, patch is {})",
            self.step, self.patch
        )
    }
}

impl std::error::Error for StepPatchMismatch {}

fn merge<T>(target: &mut T, update: &Option<T>)
where
    T: Clone,
{
    if let Some(update) = update {
        *target = update.clone();
    }
}

fn merge_opt<T>(target: &mut Option<T>, update: &Option<T>)
where
    T: Clone,
{
    if update.is_some() {
        *target = update.clone();
    }
}

fn apply_step_patch(
    payload: &mut StepPayload,
    patch: &StepPatch,
) -> Result<(), StepPatchMismatch> {
    match (payload, patch) {
        (StepPayload::TextBubble { content }, StepPatch::TextBubble { content: p_content }) => {
            merge(content, p_content);
        }
        (StepPayload::ImageBubble { url }, StepPatch::ImageBubble { url: p_url }) => {
            merge_opt(url, p_url);
        }
        (StepPayload::VideoBubble { url }, StepPatch::VideoBubble { url: p_url }) => {
            merge_opt(url, p_url);
        }
        (
            StepPayload::TextInput { labels, is_long },
            StepPatch::TextInput {
                labels: p_labels,
                is_long: p_is_long,
            },
        ) => {
            merge(labels, p_labels);
            merge(is_long, p_is_long);
        }
        (
            StepPayload::NumberInput {
                labels,
                min,
                max,
                step,
            },
            StepPatch::NumberInput {
                labels: p_labels,
                min: p_min,
                max: p_max,
                step: p_step,
            },
        ) => {
            merge(labels, p_labels);
            merge_opt(min, p_min);
            merge_opt(max, p_max);
            merge_opt(step, p_step);
        }
        (
            StepPayload::EmailInput {
                labels,
                retry_message,
            },
            StepPatch::EmailInput {
                labels: p_labels,
                retry_message: p_retry,
            },
        ) => {
            merge(labels, p_labels);
            merge_opt(retry_message, p_retry);
        }
        (
            StepPayload::UrlInput {
                labels,
                retry_message,
            },
            StepPatch::UrlInput {
                labels: p_labels,
                retry_message: p_retry,
            },
        ) => {
            merge(labels, p_labels);
            merge_opt(retry_message, p_retry);
        }
        (
            StepPayload::DateInput {
                labels,
                is_range,
                has_time,
            },
            StepPatch::DateInput {
                labels: p_labels,
                is_range: p_is_range,
                has_time: p_has_time,
            },
        ) => {
            merge(labels, p_labels);
            merge(is_range, p_is_range);
            merge(has_time, p_has_time);
        }
        (
            StepPayload::PhoneInput {
                labels,
                retry_message,
            },
            StepPatch::PhoneInput {
                labels: p_labels,
                retry_message: p_retry,
            },
        ) => {
            merge(labels, p_labels);
            merge_opt(retry_message, p_retry);
        }
        (
            StepPayload::ChoiceInput {
                item_ids: _,
                is_multiple,
                button_label,
            },
            StepPatch::ChoiceInput {
                is_multiple: p_is_multiple,
                button_label: p_button_label,
            },
        ) => {
            merge(is_multiple, p_is_multiple);
            merge(button_label, p_button_label);
        }
        (
            StepPayload::SetVariable {
                variable_id,
                expression,
            },
            StepPatch::SetVariable {
                variable_id: p_variable_id,
                expression: p_expression,
            },
        ) => {
            merge_opt(variable_id, p_variable_id);
            merge_opt(expression, p_expression);
        }
        (
            StepPayload::Condition {
                comparisons,
                logical_operator,
            },
            StepPatch::Condition {
                comparisons: p_comparisons,
                logical_operator: p_logical_operator,
            },
        ) => {
            merge(comparisons, p_comparisons);
            merge(logical_operator, p_logical_operator);
        }
        (
            StepPayload::Redirect {
                url,
                open_in_new_tab,
            },
            StepPatch::Redirect {
                url: p_url,
                open_in_new_tab: p_open,
            },
        ) => {
            merge_opt(url, p_url);
            merge(open_in_new_tab, p_open);
        }
        (
            StepPayload::GoogleSheets {
                spreadsheet_id,
                sheet_id,
            },
            StepPatch::GoogleSheets {
                spreadsheet_id: p_spreadsheet_id,
                sheet_id: p_sheet_id,
            },
        ) => {
            merge_opt(spreadsheet_id, p_spreadsheet_id);
            merge_opt(sheet_id, p_sheet_id);
        }
        (
            StepPayload::GoogleAnalytics {
                tracking_id,
                category,
                action,
            },
            StepPatch::GoogleAnalytics {
                tracking_id: p_tracking_id,
                category: p_category,
                action: p_action,
            },
        ) => {
            merge_opt(tracking_id, p_tracking_id);
            merge_opt(category, p_category);
            merge_opt(action, p_action);
        }
        (StepPayload::Webhook { url }, StepPatch::Webhook { url: p_url }) => {
            merge_opt(url, p_url);
        }
        (
            StepPayload::SendEmail {
                recipients,
                subject,
                body,
            },
            StepPatch::SendEmail {
                recipients: p_recipients,
                subject: p_subject,
                body: p_body,
            },
        ) => {
            merge(recipients, p_recipients);
            merge_opt(subject, p_subject);
            merge_opt(body, p_body);
        }
        (payload, patch) => {
            return Err(StepPatchMismatch {
                step: payload.step_type(),
                patch: patch.step_type(),
            });
        }
    }

    Ok(())
}
