// Declare the writer modules
pub mod base_writer;
pub mod json_writer;

pub use base_writer::BaseWriter;
pub use json_writer::JsonWriter;
