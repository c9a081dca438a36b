//! Nested result payloads rendered as flat tables.
//!
//! Three stages: flatten each page's fields to leaf keys, order the union
//! of keys with identity columns promoted to the front, then project every
//! page onto that shared column set. The stages are pure functions over the
//! payload; nothing here touches the backend.

pub mod columns;
pub mod flatten;
pub mod project;

pub use columns::order_columns;
pub use flatten::{cell_text, flatten_fields};
pub use project::{project_table, DocumentTable, TableRow};
