pub mod backend;
pub mod convert;
pub mod document;
pub mod models;
