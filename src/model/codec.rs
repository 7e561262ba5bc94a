//! JSON codec for [`ElementEvent`].
//!
//! Encoding goes through the derived `Serialize` impl: an object holding the
//! `type` discriminator plus the variant's fields, with unset optional
//! fields left out. Decoding is done by hand so that a missing or unknown
//! `type` is reported as such rather than as a generic serde message.
//! Optional fields (`resultVar`, `resultTag`) may be absent or `null`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::model::event::{
    AddText, ChangeText, CreateEntry, DeleteEntry, ElementEvent, EventKind, GetTextFromEditText, MathOperation,
    OpenTable, RunCustomCode, ShowDialog, ShowToast,
};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("event must be a JSON object")]
    NotAnObject,
    #[error("event list must be a JSON array")]
    NotAnArray,
    #[error("event has no \"type\" field")]
    MissingType,
    #[error("event \"type\" must be a string")]
    InvalidType,
    #[error("Unknown event type: {0}")]
    UnknownType(String),
    #[error("invalid {kind} event: {source}")]
    InvalidPayload {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn encode_event(event: &ElementEvent) -> Result<Value, serde_json::Error> {
    serde_json::to_value(event)
}

pub fn encode_events(events: &[ElementEvent]) -> Result<Value, serde_json::Error> {
    serde_json::to_value(events)
}

pub fn decode_event(value: &Value) -> Result<ElementEvent, DecodeError> {
    let obj = value.as_object().ok_or(DecodeError::NotAnObject)?;
    let type_name = match obj.get("type") {
        None | Some(Value::Null) => return Err(DecodeError::MissingType),
        Some(Value::String(s)) => s.as_str(),
        Some(_) => return Err(DecodeError::InvalidType),
    };
    let kind: EventKind = type_name
        .parse()
        .map_err(|_| DecodeError::UnknownType(type_name.to_string()))?;

    let event = match kind {
        EventKind::ShowToast => ElementEvent::ShowToast(payload::<ShowToast>(kind, value)?),
        EventKind::ShowDialog => ElementEvent::ShowDialog(payload::<ShowDialog>(kind, value)?),
        EventKind::CreateEntry => ElementEvent::CreateEntry(payload::<CreateEntry>(kind, value)?),
        EventKind::DeleteEntry => ElementEvent::DeleteEntry(payload::<DeleteEntry>(kind, value)?),
        EventKind::OpenTable => ElementEvent::OpenTable(payload::<OpenTable>(kind, value)?),
        EventKind::GetTextFromEditText => {
            ElementEvent::GetTextFromEditText(payload::<GetTextFromEditText>(kind, value)?)
        }
        EventKind::ChangeText => ElementEvent::ChangeText(payload::<ChangeText>(kind, value)?),
        EventKind::RunCustomCode => ElementEvent::RunCustomCode(payload::<RunCustomCode>(kind, value)?),
        EventKind::MathOperation => ElementEvent::MathOperation(payload::<MathOperation>(kind, value)?),
        EventKind::AddText => ElementEvent::AddText(payload::<AddText>(kind, value)?),
    };
    Ok(event)
}

pub fn decode_events(value: &Value) -> Result<Vec<ElementEvent>, DecodeError> {
    value
        .as_array()
        .ok_or(DecodeError::NotAnArray)?
        .iter()
        .map(decode_event)
        .collect()
}

/// Parses and decodes a JSON array of events from text.
pub fn decode_events_str(json: &str) -> Result<Vec<ElementEvent>, DecodeError> {
    let value: Value = serde_json::from_str(json)?;
    decode_events(&value)
}

fn payload<T: for<'de> Deserialize<'de>>(kind: EventKind, value: &Value) -> Result<T, DecodeError> {
    T::deserialize(value).map_err(|source| DecodeError::InvalidPayload { kind, source })
}

impl<'de> Deserialize<'de> for ElementEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decode_event(&value).map_err(D::Error::custom)
    }
}
