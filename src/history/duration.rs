use chrono::{DateTime, TimeZone};

/// 실행 시간을 `1d2h3m4s` 형태로 표시
///
/// 0 이 아닌 가장 큰 단위부터 시작하고, 그 아래 단위는 0 이어도 모두 표시합니다.
pub fn represent_duration<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> String {
    let elapsed = end.clone().signed_duration_since(start.clone()).num_seconds();
    format_seconds(elapsed.max(0) as u64)
}

pub fn format_seconds(total: u64) -> String {
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, seconds) = (rest / 60, rest % 60);

    if days > 0 {
        format!("{}d{}h{}m{}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
