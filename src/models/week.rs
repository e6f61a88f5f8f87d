use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The static schedule feeds served by the family server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    Science,
    Grammar,
}

impl Feed {
    pub fn all() -> Vec<Feed> {
        vec![Feed::Science, Feed::Grammar]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Science => "science",
            Feed::Grammar => "grammar",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Feed::Science => "Science",
            Feed::Grammar => "Wren & Martin",
        }
    }

    pub fn next(&self) -> Feed {
        match self {
            Feed::Science => Feed::Grammar,
            Feed::Grammar => Feed::Science,
        }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Feed {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "science" => Ok(Feed::Science),
            "grammar" | "wren" | "wren-and-martin" => Ok(Feed::Grammar),
            _ => Err(anyhow::anyhow!("Unknown schedule: {}", s)),
        }
    }
}

/// One scheduled week. `from` and `to` are day/month strings such as
/// `"03-Sep"`; the year is resolved at match time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRecord<P> {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> WeekRecord<P> {
    pub fn span(&self) -> String {
        format!("{} — {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SciencePayload {
    #[serde(default, alias = "topics")]
    pub study: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarPayload {
    #[serde(default)]
    pub grammar: Vec<String>,
    #[serde(default)]
    pub comprehension: Vec<String>,
}

/// A labelled list of raw topic strings inside a week.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSection<'a> {
    pub label: Option<&'static str>,
    pub entries: &'a [String],
}

/// Payload shapes a week can carry. The navigator and the view only ever see
/// a payload through its sections.
pub trait WeekPayload {
    fn sections(&self) -> Vec<TopicSection<'_>>;

    fn topic_count(&self) -> usize {
        self.sections().iter().map(|s| s.entries.len()).sum()
    }
}

impl WeekPayload for SciencePayload {
    fn sections(&self) -> Vec<TopicSection<'_>> {
        vec![TopicSection {
            label: None,
            entries: &self.study,
        }]
    }
}

impl WeekPayload for GrammarPayload {
    fn sections(&self) -> Vec<TopicSection<'_>> {
        vec![
            TopicSection {
                label: Some("Grammar"),
                entries: &self.grammar,
            },
            TopicSection {
                label: Some("Comprehension"),
                entries: &self.comprehension,
            },
        ]
    }
}

/// A `subject:chapter:title` entry. The title keeps any further colons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub subject: String,
    pub chapter: String,
    pub title: String,
}

impl Topic {
    pub fn parse(raw: &str) -> Topic {
        let mut parts = raw.splitn(3, ':');
        let subject = parts.next().unwrap_or_default().to_string();
        let chapter = parts.next().unwrap_or_default().to_string();
        let title = parts.next().unwrap_or_default().to_string();
        Topic {
            subject,
            chapter,
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_splits_on_first_two_colons() {
        let topic = Topic::parse("Physics:Ch4:Forces and Motion");
        assert_eq!(topic.subject, "Physics");
        assert_eq!(topic.chapter, "Ch4");
        assert_eq!(topic.title, "Forces and Motion");
    }

    #[test]
    fn topic_title_keeps_extra_colons() {
        let topic = Topic::parse("Chemistry:Ch2:Acids: an introduction");
        assert_eq!(topic.title, "Acids: an introduction");
    }

    #[test]
    fn topic_with_missing_parts_is_empty() {
        let topic = Topic::parse("Revision");
        assert_eq!(topic.subject, "Revision");
        assert_eq!(topic.chapter, "");
        assert_eq!(topic.title, "");
    }

    #[test]
    fn science_week_accepts_topics_alias() {
        let json = r#"{"from":"03-Sep","to":"10-Sep","topics":["Physics:Ch1:Units"]}"#;
        let week: WeekRecord<SciencePayload> = serde_json::from_str(json).unwrap();
        assert_eq!(week.payload.study, vec!["Physics:Ch1:Units".to_string()]);
        assert_eq!(week.span(), "03-Sep — 10-Sep");
    }

    #[test]
    fn grammar_week_has_two_sections() {
        let json = r#"{"from":"03-Sep","to":"10-Sep","grammar":["Nouns:1:Kinds"],"comprehension":[]}"#;
        let week: WeekRecord<GrammarPayload> = serde_json::from_str(json).unwrap();
        let sections = week.payload.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label, Some("Grammar"));
        assert_eq!(sections[1].entries.len(), 0);
        assert_eq!(week.payload.topic_count(), 1);
    }

    #[test]
    fn feed_from_str() {
        assert_eq!("Science".parse::<Feed>().unwrap(), Feed::Science);
        assert_eq!("wren-and-martin".parse::<Feed>().unwrap(), Feed::Grammar);
        assert!("history".parse::<Feed>().is_err());
    }
}
