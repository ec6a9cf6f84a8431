use crate::error::{Result, RunnerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// procrunner 설정
///
/// 설정 파일은 기본적으로 ~/.procrunner/config.toml 에 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// 자식 프로세스 출력을 그대로 stdout 에 미러링할지 여부
    #[serde(default = "default_true")]
    pub mirror_console: bool,

    /// 히스토리에 프로세스 ID 를 기록할지 여부
    #[serde(default = "default_true")]
    pub track_pid: bool,

    /// 히스토리 테이블에 pid/result 컬럼 포함 여부
    #[serde(default = "default_true")]
    pub extended_history: bool,

    /// 백업 도구 실행 파일 이름
    #[serde(default = "default_backup_tool")]
    pub backup_tool: String,

    /// 히스토리에서 제외할 도구 (버전 확인 등)
    #[serde(default = "default_noise_tools")]
    pub noise_tools: Vec<String>,

    /// 로그 파일 디렉토리 (없으면 stderr 만 사용)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// 히스토리 시간 표시 형식 (chrono strftime)
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_true() -> bool {
    true
}

fn default_backup_tool() -> String {
    "xtrabackup".to_string()
}

fn default_noise_tools() -> Vec<String> {
    vec!["pigz".to_string()]
}

fn default_time_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirror_console: default_true(),
            track_pid: default_true(),
            extended_history: default_true(),
            backup_tool: default_backup_tool(),
            noise_tools: default_noise_tools(),
            log_dir: None,
            time_format: default_time_format(),
        }
    }
}

impl Config {
    /// 기본 설정 파일 경로
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            RunnerError::ConfigError("Could not find home directory".to_string())
        })?;
        Ok(home.join(".procrunner").join("config.toml"))
    }

    /// 기본 경로에서 로드 (없으면 기본값 사용)
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// 지정된 경로에서 로드 (파일이 없으면 기본값 사용)
    ///
    /// # Examples
    /// ```
    /// use procrunner::config::Config;
    ///
    /// let config = Config::load_from("/nonexistent/procrunner.toml").unwrap();
    /// assert_eq!(config.backup_tool, "xtrabackup");
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| RunnerError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// 설정을 파일에 저장 (상위 디렉토리가 없으면 생성)
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| RunnerError::ConfigError(e.to_string()))?;
        fs::write(path, toml_string)?;

        Ok(())
    }
}
