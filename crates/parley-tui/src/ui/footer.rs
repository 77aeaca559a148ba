use parley_core::{
    session::Status,
    theme::{Element, Theme},
};
use ratatui::{
    prelude::{Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PLACEHOLDER: &str = "Type your question... (Enter send, Ctrl+T theme, Esc quit)";
const PROMPT: &str = "> ";

pub fn render_status(frame: &mut Frame, area: Rect, theme: &Theme, status: Status) {
    let status_line = Paragraph::new(status.label()).style(theme.ratatui_style(Element::Info));
    frame.render_widget(status_line, area);
}

/// Draws the input bar. While `busy` the bar is dimmed and shows no cursor.
pub fn render_input(frame: &mut Frame, area: Rect, theme: &Theme, input: &str, busy: bool) {
    let style = if busy {
        theme.ratatui_style(Element::Inactive)
    } else {
        theme.ratatui_style(Element::Active)
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.ratatui_style(Element::Border))
        .style(style);

    let inner_area = input_block.inner(area);

    let content = if input.is_empty() && !busy {
        Line::from(vec![
            Span::styled(PROMPT, theme.ratatui_style(Element::Accent)),
            Span::styled(PLACEHOLDER, theme.ratatui_style(Element::Inactive)),
        ])
    } else {
        Line::from(vec![
            Span::styled(PROMPT, theme.ratatui_style(Element::Accent)),
            Span::styled(visible_tail(input, inner_area.width), style),
        ])
    };

    frame.render_widget(input_block, area);
    frame.render_widget(Paragraph::new(content).style(style), inner_area);

    if !busy {
        let typed = visible_tail(input, inner_area.width).width() as u16;
        let x = inner_area.x + PROMPT.width() as u16 + typed;
        frame.set_cursor(x.min(inner_area.right().saturating_sub(1)), inner_area.y);
    }
}

/// Keeps the end of the input visible when it is wider than the bar.
/// Widths are terminal columns, so wide (CJK) characters count twice.
fn visible_tail(input: &str, width: u16) -> &str {
    let room = (width as usize).saturating_sub(PROMPT.width() + 1);
    if input.width() <= room {
        return input;
    }
    let mut used = 0;
    let mut start = input.len();
    for (idx, c) in input.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > room {
            break;
        }
        start = idx;
    }
    &input[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_visible_tail_keeps_end() {
        assert_eq!(visible_tail("hello", 20), "hello");
        assert_eq!(visible_tail("abcdefghij", 8), "fghij");
        assert_eq!(visible_tail("ñandú ñandú", 8), "ñandú");
    }

    #[test]
    fn test_visible_tail_counts_wide_chars_as_two_columns() {
        let input = "你好世界你好世界你好世界";
        let tail = visible_tail(input, 18);
        assert_eq!(tail, "好世界你好世界");
        assert_eq!(tail.width(), 14);
        assert!(input.ends_with(tail));
        // An odd column left over cannot hold half a wide char.
        assert_eq!(visible_tail("你好世界", 8), "世界");
    }

    #[test]
    fn test_cursor_follows_wide_input() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.size();
                render_input(frame, area, &theme, "你好世界你好世界你好世界", false);
            })
            .unwrap();

        // Border (1) + prompt (2) + seven wide chars (14).
        assert_eq!(terminal.get_cursor().unwrap(), (17, 1));
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.get(15, 1).symbol(), "界");
        assert_eq!(buffer.get(3, 1).symbol(), "好");
    }

    #[test]
    fn test_busy_bar_shows_no_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.size();
                render_input(frame, area, &theme, "", true);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.get(1, 1).symbol(), ">");
        assert_eq!(buffer.get(3, 1).symbol(), " ");
    }
}
