//! Terminal frontend. `shell` drives the command loop, `views` renders each
//! routed view, and this module owns the table formatting they share.

pub mod shell;
pub mod views;

use terminal_size::{terminal_size, Width};

/// When SCHOLA_OUTPUT=json, data views print their payload as JSON instead of
/// tables. Useful for piping into jq.
pub fn json_output() -> bool {
    std::env::var("SCHOLA_OUTPUT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn term_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => (w as usize).max(40),
        None => 120,
    }
}

/// Print rows as an ASCII table, capping each column to fit the terminal.
pub fn print_table(columns: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("(vazio)");
        return;
    }

    let termw = term_width();
    crate::tprintln!("[cli] terminal width={} cols", termw);
    let max_col = termw.saturating_sub(4).clamp(16, 60);

    let mut widths: Vec<usize> = columns.iter().map(|c| display_len(c).min(max_col)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            let w = display_len(cell).min(max_col);
            if w > widths[i] {
                widths[i] = w;
            }
        }
    }

    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let sep = build_separator(&widths);
    println!("{}", sep);
    println!("{}", build_row(&header, &widths));
    println!("{}", sep);
    for row in rows {
        println!("{}", build_row(row, &widths));
    }
    println!("{}", sep);
}

/// Print aligned label/value pairs, one per line.
pub fn print_kv(pairs: &[(&str, String)]) {
    let label_w = pairs.iter().map(|(k, _)| display_len(k)).max().unwrap_or(0);
    for (k, v) in pairs {
        let pad = label_w.saturating_sub(display_len(k));
        println!("  {}{}  {}", k, " ".repeat(pad), v);
    }
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let raw = cells.get(i).map(String::as_str).unwrap_or("");
        let cell = truncate(raw, *w);
        let pad = w.saturating_sub(display_len(&cell));
        // Numbers read better right-aligned
        if is_numeric_like(raw) {
            s.push_str(&format!(" {}{} |", " ".repeat(pad), cell));
        } else {
            s.push_str(&format!(" {}{} |", cell, " ".repeat(pad)));
        }
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    if display_len(s) <= max {
        return s.to_string();
    }
    let take = max.saturating_sub(1);
    let mut out: String = s.chars().take(take).collect();
    out.push('…');
    out
}

// Counts chars, not bytes; accented text is everywhere here.
fn display_len(s: &str) -> usize {
    s.chars().count()
}

fn is_numeric_like(s: &str) -> bool {
    let t = s.trim();
    !t.is_empty() && t.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_matches_widths() {
        assert_eq!(build_separator(&[3, 5]), "+-----+-------+");
    }

    #[test]
    fn rows_pad_and_align() {
        let cells = vec!["abc".to_string(), "8.5".to_string()];
        // Text left-aligned, numbers right-aligned
        assert_eq!(build_row(&cells, &[5, 5]), "| abc   |   8.5 |");
    }

    #[test]
    fn truncate_marks_cut_cells() {
        assert_eq!(truncate("Matemática", 20), "Matemática");
        assert_eq!(truncate("Matemática", 6), "Matem…");
    }

    #[test]
    fn accented_text_measures_by_chars() {
        assert_eq!(display_len("Média"), 5);
        assert_eq!(display_len("9º Ano A"), 8);
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric_like("8.5"));
        assert!(is_numeric_like("1.470,00"));
        assert!(is_numeric_like("-120"));
        assert!(!is_numeric_like("R$ 800,00"));
        assert!(!is_numeric_like("Quadra"));
        assert!(!is_numeric_like(""));
    }
}
