use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::Feed;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, active: Feed, today: NaiveDate) {
    let mut tabs = vec![Span::styled("  hearth  ", theme::accent().add_modifier(Modifier::BOLD))];
    for feed in Feed::all() {
        let style = if feed == active {
            theme::bold().add_modifier(Modifier::UNDERLINED)
        } else {
            theme::dim()
        };
        tabs.push(Span::styled("  ", theme::dim()));
        tabs.push(Span::styled(feed.display_name(), style));
    }

    let date_line = Line::from(Span::styled(
        today.format("%A, %b %d, %Y").to_string(),
        theme::dim(),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent())
        .style(theme::base());

    let paragraph = Paragraph::new(vec![Line::from(tabs), date_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
