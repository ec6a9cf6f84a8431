use crate::config::Config;
use crate::error::{Result, RunnerError};
use crate::executor::classifier::{Classification, OperationClassifier, RuleClassifier};
use crate::executor::parser::{Command, CommandParser};
use crate::executor::process::{ExecOutcome, ProcessExecutor};
use crate::executor::redact::Redactor;
use crate::history::{represent_duration, ExecutionRecord, ExecutionResult, HistoryLedger};
use chrono::Local;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// 외부 명령어 실행의 단일 진입점
///
/// 한 번에 하나의 자식 프로세스만 실행하며, `run_command` 는 자식이 끝날 때까지
/// 반환하지 않습니다. 실행 기록은 이 인스턴스가 살아있는 동안 누적됩니다.
pub struct RunnerFacade {
    config: Config,
    executor: ProcessExecutor,
    classifier: Box<dyn OperationClassifier>,
    history: HistoryLedger,
    last_output_line: String,
    console: Box<dyn Write + Send>,
}

impl RunnerFacade {
    pub fn new(config: Config) -> Self {
        Self {
            executor: ProcessExecutor::new(config.mirror_console),
            classifier: Box::new(RuleClassifier::from_config(&config)),
            history: HistoryLedger::new(),
            last_output_line: String::new(),
            console: Box::new(std::io::stdout()),
            config,
        }
    }

    /// 설정 파일 경로로 생성 (파일이 없으면 기본값)
    pub fn from_config_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Config::load_from(path)?))
    }

    pub fn with_classifier(mut self, classifier: impl OperationClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// 콘솔 미러 출력 대상 변경 (기본: stdout)
    pub fn with_console(mut self, console: impl Write + Send + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn last_output_line(&self) -> &str {
        &self.last_output_line
    }

    /// 설정의 컬럼/시간 형식으로 렌더링한 히스토리 테이블
    pub fn history_table(&self) -> String {
        self.history
            .render_table(self.config.extended_history, &self.config.time_format)
    }

    /// 명령어를 실행하고 결과를 히스토리에 기록
    ///
    /// 종료 코드가 0 이 아니면 기록을 남긴 뒤 `ProcessFailure` 를 반환합니다.
    /// 잡음 도구로 분류된 호출은 기록하지 않습니다.
    pub async fn run_command(&mut self, command: impl Into<Command>) -> Result<ExecOutcome> {
        let command = command.into();
        let args = CommandParser::parse(&command)?;
        let command_root = CommandParser::command_root(&args).to_string();
        let filtered_command = Redactor::redact_command(&args);
        debug!("subprocess args are: {:?}", Redactor::redact_args(&args));
        info!("SUBPROCESS STARTING: {}", filtered_command);

        self.last_output_line.clear();
        let start = Local::now();
        let outcome = self
            .executor
            .execute(&args, self.console.as_mut())
            .await?;
        let end = Local::now();

        self.last_output_line = outcome.last_line.clone();
        info!(
            "SUBPROCESS {} COMPLETED with exit code: {}",
            command_root, outcome.exit_code
        );

        match self.classifier.classify(&args) {
            Classification::Skip => {
                debug!("{} invocation excluded from history", command_root);
            }
            Classification::Record(operation) => {
                self.history.append(ExecutionRecord {
                    command_root: command_root.clone(),
                    command: filtered_command.clone(),
                    operation,
                    duration: represent_duration(&start, &end),
                    start,
                    end,
                    exit_code: outcome.exit_code,
                    pid: self.config.track_pid.then_some(outcome.pid),
                    result: ExecutionResult::from_exit_code(outcome.exit_code),
                });
            }
        }

        if outcome.success() {
            return Ok(outcome);
        }

        error!(
            "SUBPROCESS {} FAILED with exit code {}\n  command: {}\n  last output: {}",
            command_root, outcome.exit_code, filtered_command, outcome.last_line
        );
        Err(RunnerError::ProcessFailure {
            command_root,
            exit_code: outcome.exit_code,
            last_line: outcome.last_line,
        })
    }
}
