use crate::config::Config;
use crate::executor::parser::CommandParser;
use crate::history::OperationKind;
use once_cell::sync::Lazy;
use regex::Regex;

static DECRYPT_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--decrypt(?:=\S*)?$").expect("valid decrypt regex"));
static DECOMPRESS_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--decompress(?:=\S*)?$").expect("valid decompress regex"));

/// 분류 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// 히스토리에 남기지 않는 호출 (버전 확인 등)
    Skip,
    Record(OperationKind),
}

/// 인자 벡터로부터 수행된 작업을 추론하는 분류기
pub trait OperationClassifier: Send + Sync {
    fn classify(&self, args: &[String]) -> Classification;
}

/// 특정 실행 파일에만 적용되는 규칙
#[derive(Debug, Clone)]
pub struct ToolRule {
    pub tool: String,
    pub operation: OperationKind,
    /// 모두 포함되어야 하는 플래그
    pub all_of: Vec<String>,
    /// 하나라도 포함되면 안 되는 플래그
    pub none_of: Vec<String>,
}

impl ToolRule {
    pub fn new(tool: impl Into<String>, operation: OperationKind) -> Self {
        Self {
            tool: tool.into(),
            operation,
            all_of: Vec::new(),
            none_of: Vec::new(),
        }
    }

    pub fn requires(mut self, flag: &str) -> Self {
        self.all_of.push(flag.to_string());
        self
    }

    pub fn forbids(mut self, flag: &str) -> Self {
        self.none_of.push(flag.to_string());
        self
    }

    fn matches(&self, root: &str, args: &[String]) -> bool {
        root == self.tool
            && self.all_of.iter().all(|flag| args.contains(flag))
            && !self.none_of.iter().any(|flag| args.contains(flag))
    }
}

/// 모든 실행 파일의 토큰에 적용되는 규칙
#[derive(Debug, Clone)]
pub struct FlagRule {
    pub pattern: Regex,
    pub operation: OperationKind,
}

/// 규칙 기반 분류기
///
/// 평가 순서:
/// 1. 잡음 도구면 `Skip`
/// 2. 도구 규칙 (등록 순서대로, 첫 매치)
/// 3. 토큰별 플래그 규칙 (토큰 순서 우선, 같은 토큰에서는 등록 순서)
/// 4. 없으면 `Unclassified`
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    tool_rules: Vec<ToolRule>,
    flag_rules: Vec<FlagRule>,
    noise_tools: Vec<String>,
}

impl RuleClassifier {
    pub fn empty() -> Self {
        Self {
            tool_rules: Vec::new(),
            flag_rules: Vec::new(),
            noise_tools: Vec::new(),
        }
    }

    /// xtrabackup 기본 정책 (도구 이름은 설정에서)
    pub fn from_config(config: &Config) -> Self {
        let tool = config.backup_tool.as_str();

        Self::empty()
            .with_tool_rule(ToolRule::new(tool, OperationKind::Backup).requires("--backup"))
            .with_tool_rule(
                ToolRule::new(tool, OperationKind::Prepare)
                    .requires("--prepare")
                    .forbids("--apply-log-only"),
            )
            .with_tool_rule(
                ToolRule::new(tool, OperationKind::PrepareApplyLogOnly)
                    .requires("--prepare")
                    .requires("--apply-log-only"),
            )
            .with_flag_rule(FlagRule {
                pattern: DECRYPT_FLAG.clone(),
                operation: OperationKind::Decrypt,
            })
            .with_flag_rule(FlagRule {
                pattern: DECOMPRESS_FLAG.clone(),
                operation: OperationKind::Decompress,
            })
            .with_noise_tools(config.noise_tools.iter().cloned())
    }

    pub fn with_tool_rule(mut self, rule: ToolRule) -> Self {
        self.tool_rules.push(rule);
        self
    }

    pub fn with_flag_rule(mut self, rule: FlagRule) -> Self {
        self.flag_rules.push(rule);
        self
    }

    pub fn with_noise_tools(mut self, tools: impl IntoIterator<Item = String>) -> Self {
        self.noise_tools.extend(tools);
        self
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl OperationClassifier for RuleClassifier {
    fn classify(&self, args: &[String]) -> Classification {
        let root = CommandParser::command_root(args);

        if self.noise_tools.iter().any(|tool| tool == root) {
            return Classification::Skip;
        }

        if let Some(rule) = self.tool_rules.iter().find(|rule| rule.matches(root, args)) {
            return Classification::Record(rule.operation);
        }

        let flagged = args.iter().find_map(|arg| {
            self.flag_rules
                .iter()
                .find(|rule| rule.pattern.is_match(arg))
                .map(|rule| rule.operation)
        });

        Classification::Record(flagged.unwrap_or(OperationKind::Unclassified))
    }
}
