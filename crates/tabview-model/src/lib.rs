//! Data model for the tabview workspace.
//!
//! A [`Workspace`] maps names to [`Value`]s: single [`Series`], multi-column
//! [`Table`]s, three-dimensional [`Cube`]s, or nested workspaces. All of them
//! share the same alignment rule: combining two structures happens over the
//! union of their keys, with `None` wherever one side has no value.

pub mod arith;
pub mod cube;
pub mod error;
pub mod key;
pub mod series;
pub mod table;
pub mod value;
pub mod workspace;

pub use arith::ArithOp;
pub use cube::{Cube, Layer};
pub use error::{ModelError, Result, format_path};
pub use key::{Key, union_keys};
pub use series::Series;
pub use table::{Column, Table};
pub use value::{Entry, Value, ValueKind};
pub use workspace::Workspace;
