//! Reference host that replays a saved layout.
//!
//! Owns the on-screen state (element texts, result variables) and the data
//! tables, and binds one handler per routed event kind that mutates them.
//! User-facing effects (toasts, dialogs, opened tables) are collected as
//! [`Notice`]s for the caller to render.

pub mod tables;

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::expr::{self, format_result, Substitution};
use crate::model::event::{AddText, CreateEntry, DeleteEntry, MathOperation, OpenTable, ShowDialog, ShowToast};
use crate::model::{ElementEvent, ElementKind, Layout};
use crate::runtime::{Dispatcher, HandlerError, HandlerResult};

pub use tables::{FieldValue, TableError, TableStore};

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Toast(String),
    Dialog { title: String, message: String },
    EntryCreated { table: String, row_id: i32 },
    EntryDeleted { table: String, row_id: i32 },
    Table { name: String, rendered: String },
    Math { expression: String, result: f64 },
}

#[derive(Debug)]
pub struct Screen {
    pub layout: Layout,
    /// Numeric results stored by `resultVar`.
    pub variables: BTreeMap<String, f64>,
    /// Text results stored by `AddText`'s `resultVar`.
    pub text_variables: BTreeMap<String, String>,
    pub notices: Vec<Notice>,
}

pub struct ReplayHost {
    screen: RefCell<Screen>,
    tables: RefCell<TableStore>,
    substitution: Substitution,
}

impl ReplayHost {
    pub fn new(layout: Layout, tables: TableStore, substitution: Substitution) -> Self {
        Self {
            screen: RefCell::new(Screen {
                layout,
                variables: BTreeMap::new(),
                text_variables: BTreeMap::new(),
                notices: Vec::new(),
            }),
            tables: RefCell::new(tables),
            substitution,
        }
    }

    /// Overwrites an element's text, as if the user typed into it.
    pub fn set_text(&self, id: &str, text: &str) -> Result<(), String> {
        let mut screen = self.screen.borrow_mut();
        let element = screen
            .layout
            .element_mut(id)
            .ok_or_else(|| format!("no element with id '{id}'"))?;
        element.text = text.to_string();
        Ok(())
    }

    /// The events attached to `id`, copied out so handlers are free to
    /// mutate the screen while they run.
    pub fn events_of(&self, id: &str) -> Option<Vec<ElementEvent>> {
        self.screen.borrow().layout.element(id).map(|e| e.events.clone())
    }

    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.screen.borrow_mut().notices)
    }

    pub fn into_parts(self) -> (Screen, TableStore) {
        (self.screen.into_inner(), self.tables.into_inner())
    }

    /// Builds a dispatcher whose handlers act on this host.
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        let mut d = Dispatcher::new();
        d.bind(move |e: &ShowToast| self.on_toast(e));
        d.bind(move |e: &ShowDialog| self.on_dialog(e));
        d.bind(move |e: &CreateEntry| self.on_create_entry(e));
        d.bind(move |e: &DeleteEntry| self.on_delete_entry(e));
        d.bind(move |e: &OpenTable| self.on_open_table(e));
        d.bind(move |e: &MathOperation| self.on_math(e));
        d.bind(move |e: &AddText| self.on_add_text(e));
        d
    }

    fn notify(&self, notice: Notice) {
        self.screen.borrow_mut().notices.push(notice);
    }

    fn on_toast(&self, e: &ShowToast) -> HandlerResult {
        self.notify(Notice::Toast(e.message.clone()));
        Ok(())
    }

    fn on_dialog(&self, e: &ShowDialog) -> HandlerResult {
        self.notify(Notice::Dialog {
            title: e.title.clone(),
            message: e.message.clone(),
        });
        Ok(())
    }

    /// Captures every input field on screen as one row: column id is the
    /// element id, column name its hint (or id when the hint is empty).
    fn on_create_entry(&self, e: &CreateEntry) -> HandlerResult {
        let fields: Vec<FieldValue> = {
            let screen = self.screen.borrow();
            screen
                .layout
                .elements
                .iter()
                .filter(|el| el.kind == ElementKind::EditText)
                .map(|el| FieldValue {
                    column_id: el.id.clone(),
                    column_name: if el.hint.is_empty() { el.id.clone() } else { el.hint.clone() },
                    value: el.text.clone(),
                })
                .collect()
        };
        if fields.is_empty() {
            return Err(HandlerError::new(format!(
                "cannot create entry in '{}': no input fields on screen",
                e.table_name
            )));
        }
        let row_id = self
            .tables
            .borrow_mut()
            .create_entry(&e.table_name, &fields)
            .map_err(|err| HandlerError::with_source(format!("cannot create entry in '{}'", e.table_name), err))?;
        self.notify(Notice::EntryCreated {
            table: e.table_name.clone(),
            row_id,
        });
        Ok(())
    }

    fn on_delete_entry(&self, e: &DeleteEntry) -> HandlerResult {
        let removed = self.tables.borrow_mut().delete_last(&e.table_name);
        match removed {
            Some(row) => {
                self.notify(Notice::EntryDeleted {
                    table: e.table_name.clone(),
                    row_id: row.row_id,
                });
                Ok(())
            }
            None => Err(HandlerError::new(format!("table '{}' has no entries to delete", e.table_name))),
        }
    }

    fn on_open_table(&self, e: &OpenTable) -> HandlerResult {
        let rendered = self
            .tables
            .borrow()
            .get(&e.table_name)
            .map(|t| t.format_aligned())
            .ok_or_else(|| HandlerError::new(format!("unknown table '{}'", e.table_name)))?;
        self.notify(Notice::Table {
            name: e.table_name.clone(),
            rendered,
        });
        Ok(())
    }

    /// Variables are the numeric texts of on-screen elements, by id, plus
    /// earlier stored results (which win on a name clash). A missing
    /// `resultTag` element fails before anything is stored.
    fn on_math(&self, e: &MathOperation) -> HandlerResult {
        let mut screen = self.screen.borrow_mut();
        if !e.result_tag().is_empty() && screen.layout.element(e.result_tag()).is_none() {
            return Err(HandlerError::new(format!("no element tagged '{}'", e.result_tag())));
        }
        let mut vars: BTreeMap<String, f64> = screen
            .layout
            .elements
            .iter()
            .filter_map(|el| el.numeric_value().map(|v| (el.id.clone(), v)))
            .collect();
        vars.extend(screen.variables.iter().map(|(k, v)| (k.clone(), *v)));

        let result = expr::evaluate_with(&e.expression, &vars, self.substitution);
        tracing::debug!(expression = %e.expression, result, "math operation");

        if !e.result_var().is_empty() {
            screen.variables.insert(e.result_var().to_string(), result);
        }
        if !e.result_tag().is_empty() {
            if let Some(target) = screen.layout.element_mut(e.result_tag()) {
                target.text = format_result(result);
            }
        }
        screen.notices.push(Notice::Math {
            expression: e.expression.clone(),
            result,
        });
        Ok(())
    }

    /// Appends to the tagged element's text; `resultVar` keeps a copy of
    /// the resulting text (or of `newText` when nothing is tagged).
    fn on_add_text(&self, e: &AddText) -> HandlerResult {
        let mut screen = self.screen.borrow_mut();
        let mut result = e.new_text.clone();
        if !e.result_tag().is_empty() {
            let target = screen
                .layout
                .element_mut(e.result_tag())
                .ok_or_else(|| HandlerError::new(format!("no element tagged '{}'", e.result_tag())))?;
            target.text.push_str(&e.new_text);
            result = target.text.clone();
        }
        if !e.result_var().is_empty() {
            screen.text_variables.insert(e.result_var().to_string(), result);
        }
        Ok(())
    }
}
