use parley_core::{
    format::TERMINAL_LINE_BREAK,
    session::{Speaker, TranscriptEntry},
    theme::{Element, Theme},
};
use ratatui::{
    prelude::{Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const BODY_INDENT: &str = "  ";

/// One rendered transcript row before styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Heading { time: String, speaker: Speaker },
    Body { text: String, is_error: bool },
    Gap,
}

/// Flattens the transcript into display rows wrapped to `width` columns.
pub fn transcript_rows(entries: &[TranscriptEntry], width: u16) -> Vec<Row> {
    let wrap_width = (width as usize).saturating_sub(BODY_INDENT.len()).max(1);
    let mut rows = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            rows.push(Row::Gap);
        }
        rows.push(Row::Heading {
            time: entry.at.format("%H:%M").to_string(),
            speaker: entry.speaker,
        });
        for line in entry.text.split(TERMINAL_LINE_BREAK) {
            if line.is_empty() {
                rows.push(Row::Body {
                    text: String::new(),
                    is_error: entry.is_error,
                });
                continue;
            }
            for piece in textwrap::wrap(line, wrap_width) {
                rows.push(Row::Body {
                    text: piece.into_owned(),
                    is_error: entry.is_error,
                });
            }
        }
    }
    rows
}

/// How many rows the view can move up from the bottom.
pub fn max_scroll_back(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible)
}

/// First visible row so the newest row sits at the bottom, moved up by
/// `scroll_back` rows but never past the top.
pub fn scroll_offset(total: usize, visible: usize, scroll_back: usize) -> usize {
    max_scroll_back(total, visible).saturating_sub(scroll_back)
}

pub fn render_chat(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    entries: &[TranscriptEntry],
    scroll_back: usize,
) -> usize {
    let chat_block = Block::new()
        .borders(Borders::ALL)
        .title(" Conversation ")
        .title_style(theme.ratatui_style(Element::Title))
        .border_style(theme.ratatui_style(Element::Border))
        .style(theme.ratatui_style(Element::Text));

    let inner_area = chat_block.inner(area);
    frame.render_widget(chat_block, area);

    let rows = transcript_rows(entries, inner_area.width);
    let visible = inner_area.height as usize;
    let max_back = max_scroll_back(rows.len(), visible);
    let offset = scroll_offset(rows.len(), visible, scroll_back);

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|row| match row {
            Row::Heading { time, speaker } => Line::from(vec![
                Span::styled(format!("{time} "), theme.ratatui_style(Element::Inactive)),
                Span::styled(format!("{speaker}:"), theme.ratatui_style(Element::Accent)),
            ]),
            Row::Body { text, is_error } => {
                let element = if is_error {
                    Element::Secondary
                } else {
                    Element::Text
                };
                Line::from(Span::styled(
                    format!("{BODY_INDENT}{text}"),
                    theme.ratatui_style(element),
                ))
            }
            Row::Gap => Line::default(),
        })
        .collect();

    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner_area);
    max_back
}
