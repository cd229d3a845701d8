pub mod audio;
pub mod commands;
pub mod context;
pub mod event_source;
pub mod logging;
pub mod repl;

pub use context::CliContext;
pub use repl::readline;
