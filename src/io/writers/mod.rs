pub mod json;
pub mod terminal;

pub use json::{default_export_file_name, export_to_file, to_json, JsonWriter};
pub use terminal::TerminalWriter;
