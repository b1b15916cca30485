pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = headers.iter().map(|h| h.len()).collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(visible_len(cell));
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(headers, &widths));
    for row in rows {
        let cells = row.iter().map(|c| c.as_str()).collect::<Vec<_>>();
        lines.push(format_row(&cells, &widths));
    }

    lines.join("\n")
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let pad = widths[idx].saturating_sub(visible_len(cell));
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

// Column widths must ignore ANSI escape sequences or colored cells skew
// the layout.
fn visible_len(cell: &str) -> usize {
    let mut len = 0;
    let mut in_escape = false;
    for c in cell.chars() {
        if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else if c == '\x1b' {
            in_escape = true;
        } else {
            len += 1;
        }
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_table_aligns_columns() {
        let rows = vec![
            vec!["1".to_string(), "phone".to_string()],
            vec!["22".to_string(), "tv".to_string()],
        ];
        let table = render_table(&["ID", "NAME"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID  NAME");
        assert_eq!(lines[1], "1   phone");
        assert_eq!(lines[2], "22  tv");
    }

    #[test]
    fn render_table_ignores_ansi_codes_for_widths() {
        let rows = vec![vec!["\x1b[32mok\x1b[0m".to_string(), "x".to_string()]];
        let table = render_table(&["STATE", "N"], &rows);
        let line = table.lines().nth(1).unwrap();
        assert!(line.contains("\x1b[32mok\x1b[0m"));
        assert!(line.ends_with("x"));
    }
}
