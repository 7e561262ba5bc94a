use actionkit::model::codec::{decode_event, decode_events, decode_events_str, encode_event, encode_events, DecodeError};
use actionkit::model::event::{
    AddText, ChangeText, CreateEntry, DeleteEntry, GetTextFromEditText, MathOperation, OpenTable, RunCustomCode,
    ShowDialog,
};
use actionkit::model::{describe, ElementEvent, EventKind};
use serde_json::json;

fn every_variant() -> Vec<ElementEvent> {
    vec![
        ElementEvent::toast("Saved"),
        ShowDialog {
            title: "Oops".into(),
            message: "Try again".into(),
        }
        .into(),
        CreateEntry {
            table_name: "people".into(),
        }
        .into(),
        DeleteEntry {
            table_name: "people".into(),
        }
        .into(),
        OpenTable {
            table_name: "people".into(),
        }
        .into(),
        GetTextFromEditText { edit_text_id: 7 }.into(),
        ChangeText {
            new_text: "hello".into(),
        }
        .into(),
        RunCustomCode {
            code: "print(1)".into(),
        }
        .into(),
        MathOperation::new("a*b").into(),
        MathOperation::new("a*b").with_result_var("total").with_result_tag("out").into(),
        MathOperation::new("1").with_result_tag("").into(),
        AddText::new("!").into(),
        AddText::new("!").with_result_var("greeting").into(),
    ]
}

#[test]
fn every_variant_round_trips() {
    for event in every_variant() {
        let encoded = encode_event(&event).unwrap();
        let decoded = decode_event(&encoded).unwrap();
        assert_eq!(decoded, event, "round trip of {}", encoded);
    }
}

#[test]
fn event_list_round_trips_in_order() {
    let events = every_variant();
    let encoded = encode_events(&events).unwrap();
    assert_eq!(decode_events(&encoded).unwrap(), events);
}

#[test]
fn wire_shape_uses_fixed_field_names() {
    let event: ElementEvent = MathOperation::new("x+1").with_result_var("v").with_result_tag("t").into();
    assert_eq!(
        encode_event(&event).unwrap(),
        json!({"type": "MathOperation", "expression": "x+1", "resultVar": "v", "resultTag": "t"})
    );
    let event: ElementEvent = GetTextFromEditText { edit_text_id: 3 }.into();
    assert_eq!(
        encode_event(&event).unwrap(),
        json!({"type": "GetTextFromEditText", "editTextId": 3})
    );
    let event: ElementEvent = OpenTable { table_name: "t".into() }.into();
    assert_eq!(encode_event(&event).unwrap(), json!({"type": "OpenTable", "tableName": "t"}));
}

#[test]
fn empty_string_optional_stays_distinct_from_absent() {
    let set: ElementEvent = AddText::new("x").with_result_tag("").into();
    let unset: ElementEvent = AddText::new("x").into();
    let set_back = decode_event(&encode_event(&set).unwrap()).unwrap();
    let unset_back = decode_event(&encode_event(&unset).unwrap()).unwrap();
    assert_ne!(set_back, unset_back);
    let ElementEvent::AddText(add) = unset_back else {
        panic!("expected AddText");
    };
    assert_eq!(add.result_tag(), "");
}

#[test]
fn unknown_type_is_rejected() {
    let err = decode_event(&json!({"type": "Bogus"})).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownType(ref t) if t == "Bogus"));
    assert!(err.to_string().contains("Bogus"));
}

#[test]
fn missing_type_is_rejected() {
    assert!(matches!(
        decode_event(&json!({"message": "hi"})),
        Err(DecodeError::MissingType)
    ));
    assert!(matches!(
        decode_event(&json!({"type": 4, "message": "hi"})),
        Err(DecodeError::InvalidType)
    ));
    assert!(matches!(decode_event(&json!("ShowToast")), Err(DecodeError::NotAnObject)));
}

#[test]
fn missing_required_field_names_it() {
    let err = decode_event(&json!({"type": "ShowToast"})).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidPayload { kind: EventKind::ShowToast, .. }));
    assert!(err.to_string().contains("message"), "{}", err);

    let err = decode_event(&json!({"type": "ShowDialog", "title": "only title"})).unwrap_err();
    assert!(err.to_string().contains("message"), "{}", err);
}

#[test]
fn mistyped_field_is_rejected() {
    let err = decode_event(&json!({"type": "GetTextFromEditText", "editTextId": "seven"})).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidPayload { kind: EventKind::GetTextFromEditText, .. }));
}

#[test]
fn optional_fields_may_be_absent_or_null() {
    let decoded = decode_event(&json!({"type": "MathOperation", "expression": "1+1", "resultTag": null})).unwrap();
    assert_eq!(decoded, ElementEvent::math("1+1"));
}

#[test]
fn list_decoding_fails_on_first_bad_entry() {
    let err = decode_events_str(r#"[{"type":"ShowToast","message":"a"},{"type":"Nope"}]"#).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownType(_)));
    assert!(matches!(decode_events(&json!({})), Err(DecodeError::NotAnArray)));
    assert!(matches!(decode_events_str("[{"), Err(DecodeError::Json(_))));
}

#[test]
fn describe_labels_are_fixed() {
    assert_eq!(describe(&ElementEvent::math("1")), "Math Operation");
    assert_eq!(describe(&ElementEvent::toast("x")), "Show Toast");
    assert_eq!(EventKind::GetTextFromEditText.label(), "Get Text From Edit Text");
    for kind in EventKind::ALL {
        assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
    }
}
