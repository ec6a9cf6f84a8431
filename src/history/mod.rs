pub mod duration;
pub mod table;

use crate::error::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use duration::represent_duration;

/// 인자 벡터로부터 추론한 작업 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Backup,
    Prepare,
    PrepareApplyLogOnly,
    Decrypt,
    Decompress,
    Unclassified,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Backup => "backup",
            OperationKind::Prepare => "prepare",
            OperationKind::PrepareApplyLogOnly => "prepare/apply-log-only",
            OperationKind::Decrypt => "decrypt",
            OperationKind::Decompress => "decompress",
            OperationKind::Unclassified => "-",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionResult {
    Success,
    Failure,
}

impl ExecutionResult {
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            ExecutionResult::Success
        } else {
            ExecutionResult::Failure
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionResult::Success => f.write_str("success"),
            ExecutionResult::Failure => f.write_str("failure"),
        }
    }
}

/// 완료된 한 번의 실행 요약 (생성 후 불변)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// 실행 파일 기본 이름
    pub command_root: String,
    /// 마스킹된 명령어 텍스트
    pub command: String,
    pub operation: OperationKind,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    /// `1h1m1s` 형태
    pub duration: String,
    pub exit_code: i32,
    /// 설정에서 pid 추적을 끄면 None
    pub pid: Option<u32>,
    pub result: ExecutionResult,
}

/// 실행 히스토리 (추가 전용)
///
/// 소유한 RunnerFacade 가 살아있는 동안 계속 늘어나며, 삭제나 재정렬은 없습니다.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    records: Vec<ExecutionRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, record: ExecutionRecord) {
        self.records.push(record);
    }

    /// 실행 완료 순서대로의 전체 기록
    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&ExecutionRecord> {
        self.records.last()
    }

    /// 외부 리포트용 JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;

    pub(crate) fn sample_record(root: &str, exit_code: i32) -> ExecutionRecord {
        let start = Local::now();
        let end = start + Duration::seconds(65);
        ExecutionRecord {
            command_root: root.to_string(),
            command: format!("{} --backup --password='*'", root),
            operation: OperationKind::Backup,
            duration: represent_duration(&start, &end),
            start,
            end,
            exit_code,
            pid: Some(4242),
            result: ExecutionResult::from_exit_code(exit_code),
        }
    }

    #[test]
    fn test_append_keeps_order() {
        let mut ledger = HistoryLedger::new();
        assert!(ledger.is_empty());

        ledger.append(sample_record("xtrabackup", 0));
        ledger.append(sample_record("xbstream", 1));
        ledger.append(sample_record("xtrabackup", 0));

        let roots: Vec<&str> = ledger.records().iter().map(|r| r.command_root.as_str()).collect();
        assert_eq!(roots, vec!["xtrabackup", "xbstream", "xtrabackup"]);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.last().unwrap().command_root, "xtrabackup");
    }

    #[test]
    fn test_no_deduplication() {
        let mut ledger = HistoryLedger::new();
        let record = sample_record("xtrabackup", 0);
        ledger.append(record.clone());
        ledger.append(record);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_result_from_exit_code() {
        assert_eq!(ExecutionResult::from_exit_code(0), ExecutionResult::Success);
        assert_eq!(ExecutionResult::from_exit_code(1), ExecutionResult::Failure);
        assert_eq!(ExecutionResult::from_exit_code(-1), ExecutionResult::Failure);
    }

    #[test]
    fn test_to_json() {
        let mut ledger = HistoryLedger::new();
        ledger.append(sample_record("xtrabackup", 2));

        let json = ledger.to_json().unwrap();
        let parsed: Vec<ExecutionRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].exit_code, 2);
        assert_eq!(parsed[0].result, ExecutionResult::Failure);
        assert!(json.contains("\"operation\": \"backup\""));
        assert!(json.contains("\"duration\": \"1m5s\""));
    }

    #[test]
    fn test_empty_ledger_json() {
        let ledger = HistoryLedger::new();
        assert_eq!(ledger.to_json().unwrap(), "[]");
    }
}
