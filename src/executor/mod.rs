pub mod classifier;
pub mod parser;
pub mod process;
pub mod redact;
pub mod runner;

// Re-exports for convenience (used in main.rs and tests)
pub use classifier::{Classification, FlagRule, OperationClassifier, RuleClassifier, ToolRule};
pub use parser::{Command, CommandParser};
pub use process::{ExecOutcome, ProcessExecutor};
pub use redact::Redactor;
pub use runner::RunnerFacade;
