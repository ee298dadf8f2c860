// Employee Desk - Core Library
// Exposes all modules for use in the TUI, the web server, and tests

pub mod record;
pub mod schema;
pub mod store;
pub mod export;
pub mod logging;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use record::{
    Category, Language, Record, Role, Row, IdentityKey,
    Manager, Developer, Intern,
};
pub use schema::{RecordForm, ValidationError, ValidationResult};
pub use store::{RecordStore, StoreError};
pub use export::{
    Table, ExportError,
    to_table, to_export_text, parse_export_text, write_export,
    EXPORT_FILE_NAME, EXPORT_MIME,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
