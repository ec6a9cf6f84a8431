use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Invalid command: {0}")]
    InvalidCommandType(String),

    #[error("Failed to launch '{command}': {source}")]
    SpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command_root} exited with code {exit_code} (last output: {last_line})")]
    ProcessFailure {
        command_root: String,
        exit_code: i32,
        last_line: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RunnerError {
    /// 자식 프로세스의 종료 코드 (ProcessFailure 인 경우만)
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunnerError::ProcessFailure { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RunnerError>;
