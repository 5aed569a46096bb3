pub mod completion;
pub mod config;
pub mod logging;
pub mod lsp;
pub mod schema;
