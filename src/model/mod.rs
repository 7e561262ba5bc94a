pub mod codec;
pub mod element;
pub mod event;
pub mod layout;
pub mod table;

pub use codec::{decode_event, decode_events, encode_event, encode_events, DecodeError};
pub use element::{Element, ElementKind};
pub use event::{describe, ElementEvent, EventKind};
pub use layout::{Layout, LayoutError};
pub use table::{ColumnInfo, TableRow, TableSchema};
