use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// "asha_rao" -> "Asha Rao"
pub fn to_title_case(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || matches!(c, '.' | '_' | '-'))
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a simple ASCII progress bar for a 0-100 percentage
pub fn progress_bar(percent: u8, width: usize) -> String {
    let ratio = (percent.min(100) as f64) / 100.0;
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Cut `s` to at most `max` display columns, ending with an ellipsis if cut.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_splits_on_separators() {
        assert_eq!(to_title_case("asha_rao"), "Asha Rao");
        assert_eq!(to_title_case("RAVI.k"), "Ravi K");
        assert_eq!(to_title_case("  mum--dad "), "Mum Dad");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn progress_bar_widths() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(100, 4), "████");
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("Forces and Motion", 8), "Forces …");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }
}
