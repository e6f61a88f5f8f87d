use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{Topic, TopicSection, WeekPayload};
use crate::schedule::matcher::find_index_for_date;
use crate::schedule::WeekScheduleNavigator;
use crate::tui::theme;
use crate::utils::format::truncate_to_width;

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No schedule available.";

/// Placeholder for a schedule with no weeks.
pub fn placeholder_text(loading: bool) -> &'static str {
    if loading { LOADING_TEXT } else { EMPTY_TEXT }
}

/// Second line under a topic title.
pub fn secondary_text(label: Option<&str>, topic: &Topic) -> String {
    match label {
        Some(label) => format!("{} : {}", label, topic.subject),
        None => format!("{} • {}", topic.subject, topic.chapter),
    }
}

/// Whether the week on screen is the one containing `today`.
pub fn is_this_week<P>(nav: &WeekScheduleNavigator<P>, today: NaiveDate) -> bool {
    !nav.is_empty() && find_index_for_date(today, nav.weeks()) == Some(nav.current_index())
}

pub fn render<P: WeekPayload>(
    frame: &mut Frame,
    area: Rect,
    nav: &WeekScheduleNavigator<P>,
    today: NaiveDate,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let Some(week) = nav.current_week() else {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(placeholder_text(nav.is_loading()), theme::dim())),
        ])
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // prev / span / next
            Constraint::Length(1), // jump
            Constraint::Length(1),
            Constraint::Min(0),    // topics
            Constraint::Length(1), // caption
        ])
        .split(inner);

    let nav_style = |enabled: bool| if enabled { theme::accent() } else { theme::disabled() };
    let nav_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10),
            Constraint::Min(0),
            Constraint::Length(10),
        ])
        .split(chunks[0]);

    let mut span_line = vec![
        Span::styled(week.span(), theme::bold()),
        Span::styled(
            format!("   week {}/{}", nav.current_index() + 1, nav.len()),
            theme::dim(),
        ),
    ];
    if is_this_week(nav, today) {
        span_line.push(Span::styled("  ● this week", theme::green()));
    }

    frame.render_widget(
        Paragraph::new(Span::styled(" ◀ Prev", nav_style(nav.can_go_prev()))),
        nav_row[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(span_line)).alignment(Alignment::Center),
        nav_row[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled("Next ▶ ", nav_style(nav.can_go_next())))
            .alignment(Alignment::Right),
        nav_row[2],
    );
    frame.render_widget(
        Paragraph::new(Span::styled("[t] Jump to current week", theme::dim()))
            .alignment(Alignment::Center),
        chunks[1],
    );

    let width = chunks[3].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = week
        .payload
        .sections()
        .iter()
        .flat_map(|section| section_items(section, width))
        .collect();
    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Span::styled("  Nothing scheduled", theme::dim()))])
    } else {
        List::new(items)
    };
    frame.render_widget(list, chunks[3]);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Swipe left/right or use Prev/Next",
            theme::dim().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center),
        chunks[4],
    );
}

fn section_items<'a>(section: &TopicSection<'_>, width: usize) -> Vec<ListItem<'a>> {
    section
        .entries
        .iter()
        .map(|raw| {
            let topic = Topic::parse(raw);
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("  {}", truncate_to_width(&topic.title, width)),
                    theme::bold(),
                )),
                Line::from(Span::styled(
                    format!("  {}", secondary_text(section.label, &topic)),
                    theme::dim(),
                )),
                Line::from(""),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SciencePayload, WeekRecord};

    #[test]
    fn placeholder_follows_loading_flag() {
        assert_eq!(placeholder_text(true), "Loading...");
        assert_eq!(placeholder_text(false), "No schedule available.");
    }

    #[test]
    fn secondary_line_per_feed_shape() {
        let topic = Topic::parse("Physics:Ch4:Forces and Motion");
        assert_eq!(secondary_text(None, &topic), "Physics • Ch4");
        assert_eq!(secondary_text(Some("Grammar"), &topic), "Grammar : Physics");
    }

    #[test]
    fn this_week_marker_follows_the_index() {
        let weeks: Vec<WeekRecord<SciencePayload>> = serde_json::from_str(
            r#"[{"from":"01-Jan","to":"07-Jan"},{"from":"08-Jan","to":"14-Jan"}]"#,
        )
        .unwrap();
        let mut nav = WeekScheduleNavigator::new();
        nav.finish_load(Ok(weeks)).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        assert!(!is_this_week(&nav, today));
        nav.next_week();
        assert!(is_this_week(&nav, today));
        assert!(!is_this_week(&WeekScheduleNavigator::<SciencePayload>::new(), today));
    }
}
