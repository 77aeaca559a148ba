use parley_core::theme::{Element, Theme};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Centered popup for local warnings; dismissed by any key.
pub fn render_notice(frame: &mut Frame, theme: &Theme, message: &str) {
    let size = frame.size();
    let width = ((message.chars().count() + 6) as u16)
        .clamp(30, 60)
        .min(size.width);
    let height = 5u16.min(size.height);
    let area = Rect::new(
        size.width.saturating_sub(width) / 2,
        size.height.saturating_sub(height) / 2,
        width,
        height,
    );

    let popup = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(theme.ratatui_style(Element::Warning))
        .block(
            Block::new()
                .borders(Borders::ALL)
                .title(" Notice ")
                .border_style(theme.ratatui_style(Element::Warning))
                .style(theme.ratatui_style(Element::Background)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
