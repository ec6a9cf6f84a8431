use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "procrunner")]
#[command(version)]
#[command(about = "Run backup tool commands with live output, redacted logging and execution history", long_about = None)]
pub struct Cli {
    /// 셸 스타일 명령어 문자열 (여러 번 지정 가능, 지정 순서대로 실행)
    #[arg(short = 'c', long = "command", value_name = "STRING", required_unless_present = "argv")]
    pub commands: Vec<String>,

    /// `--` 뒤의 토큰화된 명령어 (문자열 명령어들 다음에 실행)
    #[arg(last = true, value_name = "ARGV")]
    pub argv: Vec<String>,

    /// 설정 파일 경로 (기본: ~/.procrunner/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 자식 프로세스 출력을 콘솔에 미러링하지 않음
    #[arg(long)]
    pub no_mirror: bool,

    /// 디버그 로그 (라인 단위 출력 포함)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// 실행 후 히스토리 테이블 출력
    #[arg(long)]
    pub history: bool,

    /// 히스토리를 JSON 파일로 저장
    #[arg(long, value_name = "PATH")]
    pub history_json: Option<PathBuf>,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
