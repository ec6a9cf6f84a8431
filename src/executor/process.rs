use crate::error::{Result, RunnerError};
use crate::executor::parser::CommandParser;
use crate::executor::redact::Redactor;
use std::io::{PipeReader, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// 한 번의 프로세스 실행 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    pub exit_code: i32,
    pub pid: u32,
    /// 마지막으로 관찰된 출력 라인 (실패 진단용)
    pub last_line: String,
}

impl ExecOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// 자식 프로세스를 실행하고 stdout/stderr 를 하나의 스트림으로 읽습니다.
///
/// 두 출력은 같은 파이프를 공유하므로 OS 가 관찰한 순서 그대로 섞입니다.
/// 라인은 도착하는 즉시 로그(debug)와 콘솔 미러로 전달됩니다.
pub struct ProcessExecutor {
    mirror_console: bool,
}

impl ProcessExecutor {
    pub fn new(mirror_console: bool) -> Self {
        Self { mirror_console }
    }

    /// 프로세스가 종료될 때까지 기다린 뒤 종료 코드를 반환
    ///
    /// 스트림이 EOF 에 도달한 뒤에도 종료 코드를 얻기 위해 `wait()` 로
    /// 실제 종료를 기다립니다. 시그널로 종료되면 종료 코드는 -1 입니다.
    pub async fn execute(
        &self,
        args: &[String],
        console: &mut (dyn Write + Send),
    ) -> Result<ExecOutcome> {
        let command_root = CommandParser::command_root(args).to_string();
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| RunnerError::InvalidCommandType("command is empty".to_string()))?;

        let (reader, writer) = std::io::pipe()?;

        let mut command = tokio::process::Command::new(program);
        command.args(rest).stdout(writer.try_clone()?).stderr(writer);

        let spawned = command.spawn();
        // Command 가 들고 있는 쓰기 끝을 닫아야 자식 종료 시 EOF 가 옵니다.
        drop(command);
        let mut child = spawned.map_err(|source| RunnerError::SpawnError {
            command: program.clone(),
            source,
        })?;

        let pid = child.id().unwrap_or_default();
        debug!("SUBPROCESS PID: {}", pid);

        let streamed = self.stream_lines(reader, &command_root, pid, console).await;
        let status = child.wait().await?;
        let last_line = streamed?;

        Ok(ExecOutcome {
            exit_code: status.code().unwrap_or(-1),
            pid,
            last_line,
        })
    }

    /// EOF 까지 라인 단위로 읽고 마지막 라인을 반환
    ///
    /// 읽기 끝은 이 함수 안에서 소유하므로 어떤 경로로 끝나든 닫힙니다.
    async fn stream_lines(
        &self,
        reader: PipeReader,
        command_root: &str,
        pid: u32,
        console: &mut (dyn Write + Send),
    ) -> Result<String> {
        let file = tokio::fs::File::from_std(pipe_into_file(reader));
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut last_line = String::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let decoded = String::from_utf8_lossy(&buf);
            if self.mirror_console {
                console.write_all(decoded.as_bytes())?;
                console.flush()?;
            }

            let line = decoded.trim_end_matches(['\n', '\r']);
            debug!("[{}:{}] {}", command_root, pid, Redactor::redact(line));
            last_line = line.to_string();
        }

        Ok(last_line)
    }
}

#[cfg(unix)]
fn pipe_into_file(reader: PipeReader) -> std::fs::File {
    std::fs::File::from(std::os::fd::OwnedFd::from(reader))
}

#[cfg(windows)]
fn pipe_into_file(reader: PipeReader) -> std::fs::File {
    std::fs::File::from(std::os::windows::io::OwnedHandle::from(reader))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_merges_stdout_and_stderr_in_order() {
        let executor = ProcessExecutor::new(true);
        let mut console = Vec::new();

        let outcome = executor
            .execute(&sh("echo one; echo two >&2; echo three"), &mut console)
            .await
            .unwrap();

        assert_eq!(outcome.exit_code, 0);
        assert!(outcome.pid > 0);
        assert_eq!(outcome.last_line, "three");
        assert_eq!(String::from_utf8(console).unwrap(), "one\ntwo\nthree\n");
    }

    #[tokio::test]
    async fn test_lines_arrive_before_exit() {
        struct TimedWrites(Vec<Instant>);

        impl Write for TimedWrites {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.push(Instant::now());
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let executor = ProcessExecutor::new(true);
        let mut console = TimedWrites(Vec::new());

        let outcome = executor
            .execute(&sh("echo a; sleep 1; echo b"), &mut console)
            .await
            .unwrap();

        assert_eq!(outcome.last_line, "b");
        assert_eq!(console.0.len(), 2);
        assert!(console.0[1] - console.0[0] >= Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_non_zero_exit_code_and_last_line() {
        let executor = ProcessExecutor::new(false);
        let mut console = Vec::new();

        let outcome = executor
            .execute(&sh("echo starting; echo 'fatal: disk full' >&2; exit 3"), &mut console)
            .await
            .unwrap();

        assert_eq!(outcome.exit_code, 3);
        assert_eq!(outcome.last_line, "fatal: disk full");
        assert!(console.is_empty());
    }

    #[tokio::test]
    async fn test_last_line_without_trailing_newline() {
        let executor = ProcessExecutor::new(true);
        let mut console = Vec::new();

        let outcome = executor
            .execute(&sh("printf 'a\\nb'"), &mut console)
            .await
            .unwrap();

        assert_eq!(outcome.last_line, "b");
        assert_eq!(String::from_utf8(console).unwrap(), "a\nb");
    }

    #[tokio::test]
    async fn test_no_output() {
        let executor = ProcessExecutor::new(true);
        let mut console = Vec::new();

        let outcome = executor.execute(&sh("exit 0"), &mut console).await.unwrap();

        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.last_line, "");
    }

    #[tokio::test]
    async fn test_killed_by_signal() {
        let executor = ProcessExecutor::new(false);
        let mut console = Vec::new();

        let outcome = executor
            .execute(&sh("echo bye; kill -9 $$"), &mut console)
            .await
            .unwrap();

        assert_eq!(outcome.exit_code, -1);
        assert_eq!(outcome.last_line, "bye");
    }

    #[tokio::test]
    async fn test_spawn_error() {
        let executor = ProcessExecutor::new(false);
        let mut console = Vec::new();
        let args = vec!["/nonexistent/procrunner-missing-tool".to_string()];

        let err = executor.execute(&args, &mut console).await.unwrap_err();
        match err {
            RunnerError::SpawnError { command, .. } => {
                assert_eq!(command, "/nonexistent/procrunner-missing-tool")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
