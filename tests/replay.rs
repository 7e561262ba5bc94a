use actionkit::expr::Substitution;
use actionkit::host::{Notice, ReplayHost, TableStore};
use actionkit::model::event::{AddText, CreateEntry, DeleteEntry, MathOperation, OpenTable};
use actionkit::model::{Element, ElementEvent, ElementKind, Layout};
use actionkit::runtime::{ActionExecutor, ExecuteError};

fn calculator() -> Layout {
    Layout::new(vec![
        Element::new("a", ElementKind::EditText).with_hint("First"),
        Element::new("b", ElementKind::EditText).with_hint("Second"),
        Element::new("result", ElementKind::TextView),
        Element::new("calc", ElementKind::Button)
            .with_event(MathOperation::new("a+b").with_result_tag("result").with_result_var("sum"))
            .with_event(ElementEvent::toast("Calculated")),
        Element::new("double", ElementKind::Button).with_event(MathOperation::new("sum*2").with_result_tag("result")),
        Element::new("save", ElementKind::Button)
            .with_event(CreateEntry {
                table_name: "entries".into(),
            })
            .with_event(OpenTable {
                table_name: "entries".into(),
            }),
        Element::new("undo", ElementKind::Button).with_event(DeleteEntry {
            table_name: "entries".into(),
        }),
    ])
}

fn press(host: &ReplayHost, id: &str) -> Result<(), ExecuteError> {
    let events = host.events_of(id).unwrap();
    let mut executor = ActionExecutor::new(host.dispatcher());
    executor.execute(&events)
}

#[test]
fn math_result_lands_in_the_tagged_element() {
    let host = ReplayHost::new(calculator(), TableStore::new(), Substitution::Token);
    host.set_text("a", "2").unwrap();
    host.set_text("b", "3.5").unwrap();

    press(&host, "calc").unwrap();
    assert_eq!(
        host.take_notices(),
        vec![
            Notice::Math {
                expression: "a+b".into(),
                result: 5.5
            },
            Notice::Toast("Calculated".into()),
        ]
    );

    press(&host, "double").unwrap();
    let (screen, _) = host.into_parts();
    assert_eq!(screen.variables["sum"], 5.5);
    assert_eq!(screen.layout.element("result").unwrap().text, "11");
}

#[test]
fn unparseable_input_yields_nan_not_an_error() {
    let host = ReplayHost::new(calculator(), TableStore::new(), Substitution::Token);
    host.set_text("a", "two").unwrap();
    host.set_text("b", "3").unwrap();

    press(&host, "calc").unwrap();
    let (screen, _) = host.into_parts();
    assert!(screen.variables["sum"].is_nan());
    assert_eq!(screen.layout.element("result").unwrap().text, "NaN");
}

#[test]
fn entries_are_created_opened_and_deleted() {
    let host = ReplayHost::new(calculator(), TableStore::new(), Substitution::Token);
    host.set_text("a", "1").unwrap();
    host.set_text("b", "2").unwrap();

    press(&host, "save").unwrap();
    let notices = host.take_notices();
    assert_eq!(
        notices[0],
        Notice::EntryCreated {
            table: "entries".into(),
            row_id: 0
        }
    );
    let Notice::Table { name, rendered } = &notices[1] else {
        panic!("expected table notice, got {:?}", notices[1]);
    };
    assert_eq!(name, "entries");
    assert!(rendered.starts_with("First | Second"), "{rendered}");

    press(&host, "save").unwrap();
    press(&host, "undo").unwrap();
    assert!(host.take_notices().contains(&Notice::EntryDeleted {
        table: "entries".into(),
        row_id: 1
    }));

    let (_, tables) = host.into_parts();
    let entries = tables.get("entries").unwrap();
    assert_eq!(entries.rows.len(), 1);
    assert_eq!(entries.rows[0].values["a"], "1");
}

#[test]
fn deleting_from_an_empty_table_fails() {
    let host = ReplayHost::new(calculator(), TableStore::new(), Substitution::Token);
    let err = press(&host, "undo").unwrap_err();
    assert!(matches!(err, ExecuteError::Handler(ref e) if e.message().contains("entries")));
}

#[test]
fn opening_an_unknown_table_fails_after_earlier_events_ran() {
    let layout = Layout::new(vec![Element::new("go", ElementKind::Button)
        .with_event(ElementEvent::toast("first"))
        .with_event(OpenTable {
            table_name: "ghost".into(),
        })
        .with_event(ElementEvent::toast("never"))]);
    let host = ReplayHost::new(layout, TableStore::new(), Substitution::Token);

    assert!(press(&host, "go").is_err());
    assert_eq!(host.take_notices(), vec![Notice::Toast("first".into())]);
}

#[test]
fn add_text_appends_and_stores() {
    let layout = Layout::new(vec![
        Element::new("label", ElementKind::TextView).with_text("Hello"),
        Element::new("go", ElementKind::Button)
            .with_event(AddText::new(", world").with_result_tag("label").with_result_var("greeting")),
    ]);
    let host = ReplayHost::new(layout, TableStore::new(), Substitution::Token);

    press(&host, "go").unwrap();
    let (screen, _) = host.into_parts();
    assert_eq!(screen.layout.element("label").unwrap().text, "Hello, world");
    assert_eq!(screen.text_variables["greeting"], "Hello, world");
}

#[test]
fn extra_kinds_are_unsupported_by_the_replay_host() {
    let layout = Layout::new(vec![Element::new("go", ElementKind::Button).with_event(actionkit::model::event::ChangeText {
        new_text: "x".into(),
    })]);
    let host = ReplayHost::new(layout, TableStore::new(), Substitution::Token);
    assert!(matches!(press(&host, "go"), Err(ExecuteError::Unsupported(_))));
}

#[test]
fn missing_result_tag_stores_nothing() {
    let layout = Layout::new(vec![
        Element::new("a", ElementKind::EditText).with_text("4"),
        Element::new("go", ElementKind::Button)
            .with_event(MathOperation::new("a*2").with_result_var("twice").with_result_tag("gone")),
    ]);
    let host = ReplayHost::new(layout, TableStore::new(), Substitution::Token);

    let err = press(&host, "go").unwrap_err();
    assert!(matches!(err, ExecuteError::Handler(ref e) if e.message().contains("gone")));
    let (screen, _) = host.into_parts();
    assert!(screen.variables.is_empty());
    assert!(screen.notices.is_empty());
}

#[test]
fn table_names_from_a_layout_cannot_escape_the_tables_dir() {
    let layout = Layout::new(vec![
        Element::new("a", ElementKind::EditText).with_text("1"),
        Element::new("go", ElementKind::Button).with_event(CreateEntry {
            table_name: "../../escaped".into(),
        }),
    ]);
    let host = ReplayHost::new(layout, TableStore::new(), Substitution::Token);

    let err = press(&host, "go").unwrap_err();
    assert!(matches!(err, ExecuteError::Handler(ref e) if e.message().contains("../../escaped")));
    let (_, tables) = host.into_parts();
    assert_eq!(tables.names().count(), 0);
}
