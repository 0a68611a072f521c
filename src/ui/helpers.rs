use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};

use crate::state::NoticeKind;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Footer color for each notice severity.
pub(crate) fn notice_style(kind: NoticeKind) -> Style {
    match kind {
        NoticeKind::Info => Style::default().fg(Color::Green),
        NoticeKind::Error => Style::default().fg(Color::Red),
    }
}

/// Trim a line to `width` characters, marking the cut with an ellipsis.
pub(crate) fn truncate_line(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let mut line: String = text.chars().take(width.saturating_sub(1)).collect();
    line.push('…');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_marks_the_cut() {
        assert_eq!(truncate_line("Aeon Drift", 20), "Aeon Drift");
        assert_eq!(truncate_line("Gran Turismo Heritage", 10), "Gran Turi…");
        assert_eq!(truncate_line("anything", 0), "");
    }
}
