use super::{ExecutionRecord, HistoryLedger};

const BASE_HEADER: [&str; 6] = ["command", "operation", "start time", "end time", "duration", "exit code"];
const EXTENDED_HEADER: [&str; 2] = ["pid", "result"];

impl HistoryLedger {
    /// 고정 헤더를 포함한 텍스트 테이블
    ///
    /// 기록이 없으면 헤더와 구분선만 출력합니다.
    pub fn render_table(&self, extended: bool, time_format: &str) -> String {
        let mut header: Vec<String> = BASE_HEADER.iter().map(|h| h.to_string()).collect();
        if extended {
            header.extend(EXTENDED_HEADER.iter().map(|h| h.to_string()));
        }

        let rows: Vec<Vec<String>> = self
            .records()
            .iter()
            .map(|record| row_cells(record, extended, time_format))
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut table = String::new();
        table.push_str(&format_line(&header, &widths));
        table.push_str(&format_separator(&widths));
        for row in &rows {
            table.push_str(&format_line(row, &widths));
        }
        table
    }
}

fn row_cells(record: &ExecutionRecord, extended: bool, time_format: &str) -> Vec<String> {
    let mut cells = vec![
        record.command_root.clone(),
        record.operation.to_string(),
        record.start.format(time_format).to_string(),
        record.end.format(time_format).to_string(),
        record.duration.clone(),
        record.exit_code.to_string(),
    ];

    if extended {
        cells.push(record.pid.map(|pid| pid.to_string()).unwrap_or_else(|| "-".to_string()));
        cells.push(record.result.to_string());
    }

    cells
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

fn format_separator(widths: &[usize]) -> String {
    let dashes: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    format!("|-{}-|\n", dashes.join("-|-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::tests::sample_record;

    const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    #[test]
    fn test_empty_table_has_header_only() {
        let ledger = HistoryLedger::new();
        let table = ledger.render_table(false, TIME_FORMAT);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("command"));
        assert!(lines[0].contains("exit code"));
        assert!(!lines[0].contains("pid"));
        assert!(lines[1].starts_with("|-"));
    }

    #[test]
    fn test_extended_columns() {
        let mut ledger = HistoryLedger::new();
        ledger.append(sample_record("xtrabackup", 1));

        let table = ledger.render_table(true, TIME_FORMAT);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("pid"));
        assert!(lines[0].contains("result"));
        assert!(lines[2].contains("xtrabackup"));
        assert!(lines[2].contains("4242"));
        assert!(lines[2].contains("failure"));
        assert!(lines[2].contains("1m5s"));
    }

    #[test]
    fn test_rows_are_aligned() {
        let mut ledger = HistoryLedger::new();
        ledger.append(sample_record("xtrabackup", 0));
        ledger.append(sample_record("xbstream", 0));

        let table = ledger.render_table(true, TIME_FORMAT);
        let widths: Vec<usize> = table.lines().map(|line| line.chars().count()).collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
