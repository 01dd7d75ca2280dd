use crate::data::RawTable;

/// Renders the table as aligned plain text: header, rule, rows.
/// Widths count chars so narrow no-break spaces in bucket labels line up.
pub fn format_table(table: &RawTable) -> String {
    let cols = table.headers.len();
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().take(cols).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let fmt_row = |cells: &[String]| {
        (0..cols)
            .map(|i| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                let pad = widths[i] - cell.chars().count();
                // first column is a label, the rest are numbers
                if i == 0 {
                    format!("{cell}{}", " ".repeat(pad))
                } else {
                    format!("{}{cell}", " ".repeat(pad))
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = fmt_row(&table.headers);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in &table.rows {
        out.push_str(&fmt_row(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_aligned() {
        let table = RawTable {
            headers: vec!["Bucket".into(), "All".into()],
            rows: vec![
                vec!["No usage".into(), "11.2".into()],
                vec!["<1\u{202f}h".into(), "9".into()],
            ],
        };
        let text = format_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Bucket     All");
        assert_eq!(lines[1], "--------  ----");
        assert_eq!(lines[2], "No usage  11.2");
        assert_eq!(lines[3], "<1\u{202f}h         9");
    }
}
