use once_cell::sync::Lazy;
use regex::Regex;

static PASSWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"'--password=[^']*'"#,
        r#"|"--password=(?:\\.|[^"\\])*""#,
        r#"|--password=(?:'[^']*'|"(?:\\.|[^"\\])*"|\\.|[^\s'"\\])+"#,
    ))
    .expect("valid password regex")
});

const PASSWORD_FLAG: &str = "--password=";
const MASKED_PASSWORD: &str = "--password='*'";

/// 로그에 남기는 텍스트에서 비밀번호 값을 마스킹합니다.
///
/// 실제 실행되는 인자 벡터는 절대 수정하지 않습니다.
pub struct Redactor;

impl Redactor {
    /// 자유 형식 텍스트 (출력 라인, 셸 문자열) 마스킹
    ///
    /// 값이 인용된 단어 안에서 시작하거나 백슬래시 이스케이프를 포함해도
    /// 단어 끝까지 가립니다.
    pub fn redact(text: &str) -> String {
        PASSWORD_PATTERN
            .replace_all(text, MASKED_PASSWORD)
            .into_owned()
    }

    /// 인자 벡터의 로그용 사본
    ///
    /// `--password=` 로 시작하는 토큰은 통째로 가립니다.
    pub fn redact_args(args: &[String]) -> Vec<String> {
        args.iter()
            .map(|arg| {
                if arg.starts_with(PASSWORD_FLAG) {
                    MASKED_PASSWORD.to_string()
                } else {
                    Self::redact(arg)
                }
            })
            .collect()
    }

    /// 토큰화된 명령어의 로그용 텍스트
    ///
    /// 마스킹된 토큰은 그대로, 나머지는 셸 인용 규칙으로 합칩니다.
    pub fn redact_command(args: &[String]) -> String {
        Self::redact_args(args)
            .iter()
            .map(|arg| {
                if arg == MASKED_PASSWORD {
                    arg.clone()
                } else {
                    shell_words::quote(arg).into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
