//! Generator service implementations

pub mod article_generator;
pub mod article_store;
pub mod batch_runner;
pub mod catalog;
pub mod completion_client;
pub mod link_selector;
pub mod prompt;
pub mod retry;
pub mod run_tracker;

#[cfg(test)]
pub mod tests;

pub use article_generator::*;
pub use article_store::*;
pub use batch_runner::*;
pub use catalog::*;
pub use completion_client::*;
pub use link_selector::*;
pub use prompt::*;
pub use retry::*;
pub use run_tracker::*;
