use log::{info, warn};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::feed::{FeedError, FeedSource};
use crate::models::WeekRecord;

/// Fetches one schedule feed and decodes it into week records.
pub struct ScheduleLoader<P> {
    source: Box<dyn FeedSource>,
    _payload: PhantomData<fn() -> P>,
}

impl<P: DeserializeOwned> ScheduleLoader<P> {
    pub fn new(source: Box<dyn FeedSource>) -> Self {
        Self {
            source,
            _payload: PhantomData,
        }
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    pub fn load(&self) -> Result<Vec<WeekRecord<P>>, FeedError> {
        let body = self.source.fetch().inspect_err(|e| {
            warn!("loading schedule from {} failed: {}", self.source.describe(), e);
        })?;
        let weeks: Vec<WeekRecord<P>> = serde_json::from_str(&body)?;
        info!("loaded {} weeks from {}", weeks.len(), self.source.describe());
        Ok(weeks)
    }
}


#[cfg(test)]
mod tests {
    use super::stub::StubSource;
    use super::*;
    use crate::models::{GrammarPayload, SciencePayload};

    #[test]
    fn decodes_science_feed() {
        let body = r#"[
            {"from":"03-Sep","to":"10-Sep","study":["Physics:Ch1:Units"]},
            {"from":"11-Sep","to":"17-Sep","study":[]}
        ]"#;
        let loader: ScheduleLoader<SciencePayload> =
            ScheduleLoader::new(Box::new(StubSource(Ok(body.to_string()))));
        let weeks = loader.load().unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[1].from, "11-Sep");
    }

    #[test]
    fn decodes_grammar_feed() {
        let body = r#"[{"from":"03-Sep","to":"10-Sep","grammar":["Nouns:1:Kinds"],"comprehension":["Story:1:The Fox"]}]"#;
        let loader: ScheduleLoader<GrammarPayload> =
            ScheduleLoader::new(Box::new(StubSource(Ok(body.to_string()))));
        let weeks = loader.load().unwrap();
        assert_eq!(weeks[0].payload.comprehension.len(), 1);
    }

    #[test]
    fn status_error_is_surfaced() {
        let loader: ScheduleLoader<SciencePayload> =
            ScheduleLoader::new(Box::new(StubSource(Err(404))));
        assert!(matches!(loader.load(), Err(FeedError::Status(404))));
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let loader: ScheduleLoader<SciencePayload> =
            ScheduleLoader::new(Box::new(StubSource(Ok("{not json".to_string()))));
        assert!(matches!(loader.load(), Err(FeedError::Parse(_))));
    }
}
