//! Span-building helpers for the candidate list.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::matcher::match_indices;
use crate::ui::colors;

/// Row marker for the highlighted candidate.
pub const CURSOR: &str = "* ";
/// Row marker for every other candidate.
pub const BLANK: &str = "  ";

/// Push the selection marker (`* ` or two blanks) onto spans.
pub fn push_selection_cursor(spans: &mut Vec<Span<'static>>, is_selected: bool) {
    if is_selected {
        spans.push(Span::styled(
            CURSOR,
            Style::default()
                .fg(colors::CURSOR)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::raw(BLANK));
    }
}

/// Styles for the unmatched and matched parts of a candidate name.
fn highlight_styles(is_selected: bool) -> (Style, Style) {
    let normal = if is_selected {
        Style::default()
            .fg(colors::SELECTED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::CANDIDATE)
    };
    let highlight = normal
        .fg(colors::MATCH)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    (normal, highlight)
}

/// Build spans for `text` with the characters consumed by `query`
/// highlighted. Non-matching text comes back as a single normal span.
pub fn build_highlighted_text(
    text: &str,
    query: &str,
    normal_style: Style,
    highlight_style: Style,
) -> Vec<Span<'static>> {
    let indices = match match_indices(text, query) {
        Some(indices) if !indices.is_empty() => indices,
        _ => return vec![Span::styled(text.to_string(), normal_style)],
    };

    let mut spans = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut last_idx = 0;

    for idx in indices {
        if last_idx < idx {
            let before: String = chars[last_idx..idx].iter().collect();
            spans.push(Span::styled(before, normal_style));
        }
        spans.push(Span::styled(chars[idx].to_string(), highlight_style));
        last_idx = idx + 1;
    }

    if last_idx < chars.len() {
        let after: String = chars[last_idx..].iter().collect();
        spans.push(Span::styled(after, normal_style));
    }

    spans
}

/// One list row: marker followed by the highlighted candidate name.
pub fn candidate_line(name: &str, query: &str, is_selected: bool) -> Line<'static> {
    let mut spans = Vec::new();
    push_selection_cursor(&mut spans, is_selected);
    let (normal, highlight) = highlight_styles(is_selected);
    spans.extend(build_highlighted_text(name, query, normal, highlight));

    let line = Line::from(spans);
    if is_selected {
        line.style(Style::default().bg(colors::SELECTED_BG))
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(spans: &[Span]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_on_matched_chars() {
        let normal = Style::default();
        let highlight = Style::default().add_modifier(Modifier::BOLD);
        let spans = build_highlighted_text("work/standup.n", "wsn", normal, highlight);
        // Greedy: the first 'n' after the 's' wins, not the extension
        assert_eq!(
            contents(&spans),
            vec!["w", "ork/", "s", "ta", "n", "dup.n"]
        );
        assert_eq!(spans[0].style, highlight);
        assert_eq!(spans[1].style, normal);
        assert_eq!(spans[4].style, highlight);
        assert_eq!(spans[5].style, normal);
    }

    #[test]
    fn test_highlight_without_match_is_plain() {
        let normal = Style::default();
        let highlight = Style::default().add_modifier(Modifier::BOLD);
        assert_eq!(
            contents(&build_highlighted_text("alpha.n", "", normal, highlight)),
            vec!["alpha.n"]
        );
        assert_eq!(
            contents(&build_highlighted_text("alpha.n", "zz", normal, highlight)),
            vec!["alpha.n"]
        );
    }

    #[test]
    fn test_highlight_handles_multibyte_names() {
        let normal = Style::default();
        let highlight = Style::default().add_modifier(Modifier::BOLD);
        let spans = build_highlighted_text("café.n", "é", normal, highlight);
        assert_eq!(contents(&spans), vec!["caf", "é", ".n"]);
    }

    #[test]
    fn test_candidate_line_marker() {
        let selected = candidate_line("beta.n", "", true);
        assert_eq!(selected.spans[0].content, CURSOR);
        let other = candidate_line("beta.n", "", false);
        assert_eq!(other.spans[0].content, BLANK);
        assert_eq!(other.spans[1].content, "beta.n");
    }
}
