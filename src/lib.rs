pub mod changelog;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_store;
pub mod naming;
pub mod registry;
pub mod store;

pub use comic_translator_common as common;
pub use registry::GroupRegistry;
pub use store::{GroupStore, LoadStatus};
