//! Routes each event to the handler the host bound for its kind.
//!
//! There is one slot per event kind and at most one handler per slot;
//! binding again replaces the previous handler. An empty slot behaves as a
//! no-op. Handlers run synchronously on the caller's thread and may borrow
//! host state for `'h`.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::event::{
    AddText, ChangeText, CreateEntry, DeleteEntry, ElementEvent, EventKind, GetTextFromEditText, MathOperation,
    OpenTable, RunCustomCode, ShowDialog, ShowToast,
};
use crate::runtime::error::HandlerError;

pub type HandlerResult = Result<(), HandlerError>;

pub type Handler<'h, P> = Box<dyn FnMut(&P) -> HandlerResult + 'h>;

pub type Slot<'h, P> = Option<Handler<'h, P>>;

/// Kinds the executor hands to the dispatcher out of the box.
/// `GetTextFromEditText`, `ChangeText` and `RunCustomCode` join the table
/// once a handler is bound for them.
pub const DEFAULT_ROUTED: [EventKind; 7] = [
    EventKind::ShowToast,
    EventKind::ShowDialog,
    EventKind::CreateEntry,
    EventKind::DeleteEntry,
    EventKind::OpenTable,
    EventKind::AddText,
    EventKind::MathOperation,
];

/// An event payload type with a handler slot on the [`Dispatcher`].
pub trait Routable: Sized + 'static {
    const KIND: EventKind;

    fn slot<'a, 'h>(dispatcher: &'a mut Dispatcher<'h>) -> &'a mut Slot<'h, Self>;
}

pub struct Dispatcher<'h> {
    show_toast: Slot<'h, ShowToast>,
    show_dialog: Slot<'h, ShowDialog>,
    create_entry: Slot<'h, CreateEntry>,
    delete_entry: Slot<'h, DeleteEntry>,
    open_table: Slot<'h, OpenTable>,
    get_text: Slot<'h, GetTextFromEditText>,
    change_text: Slot<'h, ChangeText>,
    custom_code: Slot<'h, RunCustomCode>,
    math: Slot<'h, MathOperation>,
    add_text: Slot<'h, AddText>,
    routed: BTreeSet<EventKind>,
}

impl<'h> Dispatcher<'h> {
    pub fn new() -> Self {
        Self {
            show_toast: None,
            show_dialog: None,
            create_entry: None,
            delete_entry: None,
            open_table: None,
            get_text: None,
            change_text: None,
            custom_code: None,
            math: None,
            add_text: None,
            routed: DEFAULT_ROUTED.into_iter().collect(),
        }
    }

    /// Installs `handler` for payload type `P`, replacing any previous one.
    pub fn bind<P, F>(&mut self, handler: F)
    where
        P: Routable,
        F: FnMut(&P) -> HandlerResult + 'h,
    {
        let handler: Handler<'h, P> = Box::new(handler);
        *P::slot(self) = Some(handler);
        self.routed.insert(P::KIND);
        tracing::debug!(kind = %P::KIND, "handler bound");
    }

    /// Empties the slot for `kind`. Kinds outside [`DEFAULT_ROUTED`] also
    /// leave the routing table.
    pub fn unbind(&mut self, kind: EventKind) {
        match kind {
            EventKind::ShowToast => self.show_toast = None,
            EventKind::ShowDialog => self.show_dialog = None,
            EventKind::CreateEntry => self.create_entry = None,
            EventKind::DeleteEntry => self.delete_entry = None,
            EventKind::OpenTable => self.open_table = None,
            EventKind::GetTextFromEditText => self.get_text = None,
            EventKind::ChangeText => self.change_text = None,
            EventKind::RunCustomCode => self.custom_code = None,
            EventKind::MathOperation => self.math = None,
            EventKind::AddText => self.add_text = None,
        }
        if !DEFAULT_ROUTED.contains(&kind) {
            self.routed.remove(&kind);
        }
    }

    /// Drops every handler and restores the default routing table.
    pub fn reset(&mut self) {
        *self = Dispatcher::new();
    }

    pub fn is_routed(&self, kind: EventKind) -> bool {
        self.routed.contains(&kind)
    }

    pub fn is_bound(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::ShowToast => self.show_toast.is_some(),
            EventKind::ShowDialog => self.show_dialog.is_some(),
            EventKind::CreateEntry => self.create_entry.is_some(),
            EventKind::DeleteEntry => self.delete_entry.is_some(),
            EventKind::OpenTable => self.open_table.is_some(),
            EventKind::GetTextFromEditText => self.get_text.is_some(),
            EventKind::ChangeText => self.change_text.is_some(),
            EventKind::RunCustomCode => self.custom_code.is_some(),
            EventKind::MathOperation => self.math.is_some(),
            EventKind::AddText => self.add_text.is_some(),
        }
    }

    /// Calls the handler bound for `event`'s kind with its payload. An
    /// empty slot is a no-op. Handler errors are returned as-is.
    pub fn dispatch(&mut self, event: &ElementEvent) -> HandlerResult {
        match event {
            ElementEvent::ShowToast(p) => invoke(&mut self.show_toast, p),
            ElementEvent::ShowDialog(p) => invoke(&mut self.show_dialog, p),
            ElementEvent::CreateEntry(p) => invoke(&mut self.create_entry, p),
            ElementEvent::DeleteEntry(p) => invoke(&mut self.delete_entry, p),
            ElementEvent::OpenTable(p) => invoke(&mut self.open_table, p),
            ElementEvent::GetTextFromEditText(p) => invoke(&mut self.get_text, p),
            ElementEvent::ChangeText(p) => invoke(&mut self.change_text, p),
            ElementEvent::RunCustomCode(p) => invoke(&mut self.custom_code, p),
            ElementEvent::MathOperation(p) => invoke(&mut self.math, p),
            ElementEvent::AddText(p) => invoke(&mut self.add_text, p),
        }
    }
}

fn invoke<P>(slot: &mut Slot<'_, P>, payload: &P) -> HandlerResult {
    match slot {
        Some(handler) => handler(payload),
        None => Ok(()),
    }
}

impl Default for Dispatcher<'_> {
    fn default() -> Self {
        Dispatcher::new()
    }
}

impl fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<EventKind> = EventKind::ALL.into_iter().filter(|k| self.is_bound(*k)).collect();
        f.debug_struct("Dispatcher")
            .field("bound", &bound)
            .field("routed", &self.routed)
            .finish()
    }
}

macro_rules! impl_routable {
    ($($payload:ident => $field:ident),+ $(,)?) => {
        $(
            impl Routable for $payload {
                const KIND: EventKind = EventKind::$payload;

                fn slot<'a, 'h>(dispatcher: &'a mut Dispatcher<'h>) -> &'a mut Slot<'h, Self> {
                    &mut dispatcher.$field
                }
            }
        )+
    };
}

impl_routable!(
    ShowToast => show_toast,
    ShowDialog => show_dialog,
    CreateEntry => create_entry,
    DeleteEntry => delete_entry,
    OpenTable => open_table,
    GetTextFromEditText => get_text,
    ChangeText => change_text,
    RunCustomCode => custom_code,
    MathOperation => math,
    AddText => add_text,
);
