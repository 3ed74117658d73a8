//! CSV reading and writing.

mod reader;
mod writer;

pub use reader::{dataframe_to_table, read_csv_table};
pub use writer::write_csv;
