// ABOUTME: The interactive shell: classification, builtins, run orchestration, loop

mod builtins;
mod classifier;
mod error;
mod exec;
mod repl;
mod run;

pub use classifier::{classify, Builtin, Classification};
pub use error::ShellError;
pub use repl::Shell;
