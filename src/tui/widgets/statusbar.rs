use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

/// Key hints, or the current notice when there is one.
pub fn render(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    let line = match notice {
        Some(text) => Line::from(Span::styled(format!("  {}", text), theme::amber())),
        None => {
            let hints = [
                ("[←]", " prev  "),
                ("[→]", " next  "),
                ("[t]", " this week  "),
                ("[Tab]", " schedule  "),
                ("[r]", " reload  "),
                ("[?]", " help  "),
                ("[Esc]", " quit"),
            ];
            let mut spans = Vec::new();
            for (key, label) in &hints {
                spans.push(Span::styled(*key, theme::accent()));
                spans.push(Span::styled(*label, theme::dim()));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
