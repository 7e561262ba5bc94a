use serde::{Deserialize, Serialize};

use crate::expr::TextSource;
use crate::model::event::ElementEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ElementKind {
    TextView,
    EditText,
    Button,
    Spinner,
    CheckBox,
    Other,
}

/// A component placed on the canvas. `events` fire together, in order,
/// when the element is triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub events: Vec<ElementEvent>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            text: String::new(),
            hint: String::new(),
            events: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn with_event(mut self, event: impl Into<ElementEvent>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Current text parsed as a number, if it is one.
    pub fn numeric_value(&self) -> Option<f64> {
        self.text.trim().parse().ok().filter(|v: &f64| v.is_finite())
    }
}

impl TextSource for Element {
    fn current_text(&self) -> &str {
        &self.text
    }
}
