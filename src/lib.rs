//! 백업 도구 등 외부 명령어를 실행하는 엔진
//!
//! 자식 프로세스의 출력을 실시간으로 로그/콘솔에 흘려보내고, 비밀번호를
//! 마스킹하며, 수행된 작업을 분류해 실행 히스토리에 남깁니다.
//!
//! ```no_run
//! use procrunner::{Config, RunnerFacade};
//!
//! # async fn demo() -> procrunner::Result<()> {
//! let mut runner = RunnerFacade::new(Config::default());
//! runner.run_command("xtrabackup --backup --target-dir=/data").await?;
//! println!("{}", runner.history_table());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod logging;

pub use config::Config;
pub use error::{Result, RunnerError};
pub use executor::{Command, RunnerFacade};
pub use history::{ExecutionRecord, ExecutionResult, HistoryLedger, OperationKind};
