//! Line breaking against measured text width.
//!
//! Break opportunities are spaces and the boundaries around wide (CJK)
//! characters, so Chinese text wraps per character while Latin words stay
//! whole. Every candidate line is measured through the surface; nothing is
//! estimated from character counts.

use super::surface::Surface;

/// True for East Asian wide characters, each of which is its own break unit.
pub fn is_wide(ch: char) -> bool {
    matches!(ch,
        '\u{1100}'..='\u{115F}'
        | '\u{2E80}'..='\u{A4CF}'
        | '\u{AC00}'..='\u{D7A3}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FE30}'..='\u{FE4F}'
        | '\u{FF00}'..='\u{FF60}'
        | '\u{FFE0}'..='\u{FFE6}'
        | '\u{20000}'..='\u{2FFFD}'
        | '\u{30000}'..='\u{3FFFD}')
}

/// Split a paragraph into break units. Trailing spaces stay attached to the
/// unit before them.
fn units(paragraph: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_spaces = false;

    for ch in paragraph.chars() {
        if ch.is_whitespace() {
            current.push(ch);
            in_spaces = true;
        } else if is_wide(ch) {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            current.push(ch);
            in_spaces = false;
            // a wide char followed by spaces keeps them; anything else breaks
            out.push(std::mem::take(&mut current));
        } else {
            if in_spaces && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            current.push(ch);
            in_spaces = false;
        }
    }

    if !current.is_empty() {
        out.push(current);
    }

    // Re-attach spaces that followed a wide character.
    let mut merged: Vec<String> = Vec::with_capacity(out.len());
    for unit in out {
        match merged.last_mut() {
            Some(prev) if unit.chars().all(char::is_whitespace) => prev.push_str(&unit),
            _ => merged.push(unit),
        }
    }
    merged
}

/// Split text at character level into pieces no wider than `max_width`.
///
/// Returns the full lines and the unfinished remainder. A single character
/// wider than the limit still gets a line of its own.
fn break_chars<S: Surface + ?Sized>(
    surface: &S,
    text: &str,
    size_pt: f32,
    max_width: f32,
) -> (Vec<String>, String) {
    let mut lines = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && surface.measure_text(candidate.trim_end(), size_pt) > max_width {
            lines.push(std::mem::take(&mut current).trim_end().to_string());
            current.push(ch);
        } else {
            current = candidate;
        }
    }

    (lines, current)
}

/// Wrap `text` into lines no wider than `max_width` mm at `size_pt`.
///
/// Explicit newlines force a break and each paragraph loses its leading
/// whitespace. Empty or whitespace-only text yields no lines.
pub fn wrap_text<S: Surface + ?Sized>(
    surface: &S,
    text: &str,
    size_pt: f32,
    max_width: f32,
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let fits = |s: &str| surface.measure_text(s.trim_end(), size_pt) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        // drop leading indentation
        let paragraph = paragraph.trim_end_matches('\r').trim_start();
        let mut line = String::new();

        for unit in units(paragraph) {
            let candidate = format!("{}{}", line, unit);
            if fits(&candidate) {
                line = candidate;
                continue;
            }

            if !line.trim().is_empty() {
                lines.push(line.trim_end().to_string());
            }
            line.clear();

            if fits(&unit) {
                line = unit;
            } else {
                let (full, rest) = break_chars(surface, &unit, size_pt, max_width);
                lines.extend(full);
                line = rest;
            }
        }

        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::surface::testing::RecordingSurface;
    use pretty_assertions::assert_eq;

    /// Width in mm of one em at 10pt on the recording surface.
    const EM_10: f32 = 10.0 * crate::font::MM_PER_PT;

    #[test]
    fn test_units() {
        assert_eq!(units("ab cd"), vec!["ab ", "cd"]);
        assert_eq!(units("中文ab"), vec!["中", "文", "ab"]);
        assert_eq!(units("中 文"), vec!["中 ", "文"]);
        assert_eq!(units("T-Shirt-中文吊牌"), vec!["T-Shirt-", "中", "文", "吊", "牌"]);
    }

    #[test]
    fn test_short_text_single_line() {
        let s = RecordingSurface::default();
        assert_eq!(wrap_text(&s, "Hat", 10.0, 58.0), vec!["Hat"]);
    }

    #[test]
    fn test_empty_text_no_lines() {
        let s = RecordingSurface::default();
        assert!(wrap_text(&s, "", 10.0, 58.0).is_empty());
        assert!(wrap_text(&s, "   ", 10.0, 58.0).is_empty());
    }

    #[test]
    fn test_latin_wraps_at_spaces() {
        let s = RecordingSurface::default();
        // each char is half an em; limit fits 10 chars
        let lines = wrap_text(&s, "alpha beta gamma", 10.0, EM_10 * 5.0 + 0.01);
        assert_eq!(lines, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn test_cjk_wraps_per_character() {
        let s = RecordingSurface::default();
        let lines = wrap_text(&s, "纯棉圆领短袖衫", 10.0, EM_10 * 3.0 + 0.01);
        assert_eq!(lines, vec!["纯棉圆", "领短袖", "衫"]);
    }

    #[test]
    fn test_overlong_word_breaks_at_characters() {
        let s = RecordingSurface::default();
        let lines = wrap_text(&s, "abcdefghij", 10.0, EM_10 * 2.0 + 0.01);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_lines_fit_limit() {
        let s = RecordingSurface::default();
        let limit = EM_10 * 4.0;
        let text = "Organic cotton 圆领短袖 T-Shirt with embroidered logo 中文吊牌";
        for line in wrap_text(&s, text, 10.0, limit) {
            assert!(
                s.measure_text(&line, 10.0) <= limit + 1e-4 || line.chars().count() == 1,
                "line too wide: {:?}",
                line
            );
        }
    }

    #[test]
    fn test_explicit_newline() {
        let s = RecordingSurface::default();
        assert_eq!(wrap_text(&s, "a\nb", 10.0, 58.0), vec!["a", "b"]);
    }

    #[test]
    fn test_leading_whitespace_adds_no_blank_line() {
        let s = RecordingSurface::default();
        let limit = EM_10 * 2.0 + 0.01;
        assert_eq!(wrap_text(&s, " abcdefghij", 10.0, limit), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text(&s, "  Hat", 10.0, 58.0), vec!["Hat"]);
        assert_eq!(wrap_text(&s, "a\n   bcdef", 10.0, limit), vec!["a", "bcde", "f"]);
    }
}
