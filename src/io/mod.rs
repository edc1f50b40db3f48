mod format;
mod input;
mod output;
mod store;

pub use format::DocumentFormat;
pub use input::{import_schema_str, import_schema_value, parse_document_str};
pub use output::{ExportOptions, OutputDestination, emit, export_file_name, serialize_schema};
pub use store::{FileStore, KeyValueStore, MemoryStore, SchemaLibrary};
