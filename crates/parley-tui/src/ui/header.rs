use parley_core::{
    settings::Settings,
    theme::{Element, Theme},
};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph},
};

pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme, settings: &Settings) {
    let title = Title::from(" Parley ").alignment(Alignment::Left);

    let line = Line::from(vec![
        Span::styled(settings.model.as_str(), theme.ratatui_style(Element::Accent)),
        Span::styled(" @ ", theme.ratatui_style(Element::Inactive)),
        Span::styled(settings.endpoint.as_str(), theme.ratatui_style(Element::Text)),
    ]);

    let header = Paragraph::new(line)
        .style(theme.ratatui_style(Element::Text))
        .block(
            Block::new()
                .borders(Borders::ALL)
                .title(title)
                .title_style(theme.ratatui_style(Element::Title))
                .border_style(theme.ratatui_style(Element::Border)),
        );

    frame.render_widget(header, area);
}
