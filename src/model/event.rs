use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An action attached to a UI element. Events are created at design time,
/// never change afterwards, and fire in list order when their element is
/// triggered.
///
/// Serialized with a `type` discriminator next to the variant's own fields;
/// see [`crate::model::codec`] for the decoding rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ElementEvent {
    ShowToast(ShowToast),
    ShowDialog(ShowDialog),
    CreateEntry(CreateEntry),
    DeleteEntry(DeleteEntry),
    OpenTable(OpenTable),
    GetTextFromEditText(GetTextFromEditText),
    ChangeText(ChangeText),
    RunCustomCode(RunCustomCode),
    MathOperation(MathOperation),
    AddText(AddText),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowToast {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDialog {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntry {
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEntry {
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTable {
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTextFromEditText {
    pub edit_text_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeText {
    pub new_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCustomCode {
    pub code: String,
}

/// Evaluate `expression`; store the result under `result_var` and/or show
/// it in the element tagged `result_tag`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathOperation {
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_var: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddText {
    pub new_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_var: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_tag: Option<String>,
}

impl MathOperation {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result_var: None,
            result_tag: None,
        }
    }

    pub fn with_result_var(mut self, var: impl Into<String>) -> Self {
        self.result_var = Some(var.into());
        self
    }

    pub fn with_result_tag(mut self, tag: impl Into<String>) -> Self {
        self.result_tag = Some(tag.into());
        self
    }

    /// Empty when unset.
    pub fn result_var(&self) -> &str {
        self.result_var.as_deref().unwrap_or("")
    }

    /// Empty when unset.
    pub fn result_tag(&self) -> &str {
        self.result_tag.as_deref().unwrap_or("")
    }
}

impl AddText {
    pub fn new(new_text: impl Into<String>) -> Self {
        Self {
            new_text: new_text.into(),
            result_var: None,
            result_tag: None,
        }
    }

    pub fn with_result_var(mut self, var: impl Into<String>) -> Self {
        self.result_var = Some(var.into());
        self
    }

    pub fn with_result_tag(mut self, tag: impl Into<String>) -> Self {
        self.result_tag = Some(tag.into());
        self
    }

    pub fn result_var(&self) -> &str {
        self.result_var.as_deref().unwrap_or("")
    }

    pub fn result_tag(&self) -> &str {
        self.result_tag.as_deref().unwrap_or("")
    }
}

/// Field-less mirror of [`ElementEvent`]: the `type` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    ShowToast,
    ShowDialog,
    CreateEntry,
    DeleteEntry,
    OpenTable,
    GetTextFromEditText,
    ChangeText,
    RunCustomCode,
    MathOperation,
    AddText,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::ShowToast,
        EventKind::ShowDialog,
        EventKind::CreateEntry,
        EventKind::DeleteEntry,
        EventKind::OpenTable,
        EventKind::GetTextFromEditText,
        EventKind::ChangeText,
        EventKind::RunCustomCode,
        EventKind::MathOperation,
        EventKind::AddText,
    ];

    /// The `type` string used in saved layouts.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::ShowToast => "ShowToast",
            EventKind::ShowDialog => "ShowDialog",
            EventKind::CreateEntry => "CreateEntry",
            EventKind::DeleteEntry => "DeleteEntry",
            EventKind::OpenTable => "OpenTable",
            EventKind::GetTextFromEditText => "GetTextFromEditText",
            EventKind::ChangeText => "ChangeText",
            EventKind::RunCustomCode => "RunCustomCode",
            EventKind::MathOperation => "MathOperation",
            EventKind::AddText => "AddText",
        }
    }

    /// Human-readable label for listings. Has no effect on execution.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::ShowToast => "Show Toast",
            EventKind::ShowDialog => "Show Dialog",
            EventKind::CreateEntry => "Create Entry",
            EventKind::DeleteEntry => "Delete Entry",
            EventKind::OpenTable => "Open Table",
            EventKind::GetTextFromEditText => "Get Text From Edit Text",
            EventKind::ChangeText => "Change Text",
            EventKind::RunCustomCode => "Run Custom Code",
            EventKind::MathOperation => "Math Operation",
            EventKind::AddText => "Add Text",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown event type: {s}"))
    }
}

impl ElementEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ElementEvent::ShowToast(_) => EventKind::ShowToast,
            ElementEvent::ShowDialog(_) => EventKind::ShowDialog,
            ElementEvent::CreateEntry(_) => EventKind::CreateEntry,
            ElementEvent::DeleteEntry(_) => EventKind::DeleteEntry,
            ElementEvent::OpenTable(_) => EventKind::OpenTable,
            ElementEvent::GetTextFromEditText(_) => EventKind::GetTextFromEditText,
            ElementEvent::ChangeText(_) => EventKind::ChangeText,
            ElementEvent::RunCustomCode(_) => EventKind::RunCustomCode,
            ElementEvent::MathOperation(_) => EventKind::MathOperation,
            ElementEvent::AddText(_) => EventKind::AddText,
        }
    }

    pub fn toast(message: impl Into<String>) -> Self {
        ElementEvent::ShowToast(ShowToast {
            message: message.into(),
        })
    }

    pub fn dialog(title: impl Into<String>, message: impl Into<String>) -> Self {
        ElementEvent::ShowDialog(ShowDialog {
            title: title.into(),
            message: message.into(),
        })
    }

    pub fn math(expression: impl Into<String>) -> Self {
        ElementEvent::MathOperation(MathOperation::new(expression))
    }
}

/// Fixed label for an event, e.g. "Math Operation".
pub fn describe(event: &ElementEvent) -> &'static str {
    event.kind().label()
}

macro_rules! impl_from_payload {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for ElementEvent {
                fn from(payload: $variant) -> Self {
                    ElementEvent::$variant(payload)
                }
            }
        )+
    };
}

impl_from_payload!(
    ShowToast,
    ShowDialog,
    CreateEntry,
    DeleteEntry,
    OpenTable,
    GetTextFromEditText,
    ChangeText,
    RunCustomCode,
    MathOperation,
    AddText,
);
