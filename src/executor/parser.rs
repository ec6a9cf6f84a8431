use crate::error::{Result, RunnerError};

/// 실행할 명령어
///
/// 셸 스타일 문자열이거나, 이미 토큰화된 인자 목록입니다.
/// 첫 번째 토큰이 실행 파일 경로/이름입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Line(String),
    Args(Vec<String>),
}

impl Command {
    /// 로그용 명령어 텍스트
    ///
    /// 토큰 목록은 셸 인용 규칙에 맞게 다시 합칩니다.
    pub fn display_text(&self) -> String {
        match self {
            Command::Line(line) => line.clone(),
            Command::Args(args) => shell_words::join(args),
        }
    }
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        Command::Line(line.to_string())
    }
}

impl From<String> for Command {
    fn from(line: String) -> Self {
        Command::Line(line)
    }
}

impl From<Vec<String>> for Command {
    fn from(args: Vec<String>) -> Self {
        Command::Args(args)
    }
}

impl From<&[&str]> for Command {
    fn from(args: &[&str]) -> Self {
        Command::Args(args.iter().map(|s| s.to_string()).collect())
    }
}

pub struct CommandParser;

impl CommandParser {
    /// 명령어를 인자 벡터로 변환
    ///
    /// 토큰 목록은 그대로 반환하고, 문자열은 POSIX 셸 단어 분리 규칙
    /// (인용/이스케이프 포함)으로 토큰화합니다. 실행 파일을 확정할 수 없는
    /// 입력은 `InvalidCommandType` 입니다.
    pub fn parse(command: &Command) -> Result<Vec<String>> {
        let args = match command {
            Command::Args(args) => args.clone(),
            Command::Line(line) => shell_words::split(line).map_err(|e| {
                RunnerError::InvalidCommandType(format!("cannot tokenize command: {}", e))
            })?,
        };

        match args.first() {
            None => Err(RunnerError::InvalidCommandType(
                "command is empty".to_string(),
            )),
            Some(program) if program.trim().is_empty() => Err(RunnerError::InvalidCommandType(
                "executable name is empty".to_string(),
            )),
            Some(_) => Ok(args),
        }
    }

    /// 실행 파일의 기본 이름 (경로 제외)
    pub fn command_root(args: &[String]) -> &str {
        args.first()
            .map(|program| program.rsplit('/').next().unwrap_or(program))
            .unwrap_or_default()
    }
}
