use chrono::NaiveDate;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::feed::FeedError;
use crate::models::WeekRecord;
use crate::schedule::loader::ScheduleLoader;
use crate::schedule::matcher::find_index_for_date;

pub const DEFAULT_SWIPE_THRESHOLD: i32 = 40;

#[derive(Debug, Error, PartialEq)]
pub enum NavError {
    #[error("Current week not found in schedule")]
    NotFoundInSchedule,
}

/// Holds one loaded schedule and the week currently on screen.
#[derive(Debug, Clone)]
pub struct WeekScheduleNavigator<P> {
    weeks: Vec<WeekRecord<P>>,
    current_index: usize,
    loading: bool,
}

impl<P> Default for WeekScheduleNavigator<P> {
    fn default() -> Self {
        Self {
            weeks: Vec::new(),
            current_index: 0,
            loading: false,
        }
    }
}

impl<P> WeekScheduleNavigator<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weeks(&self) -> &[WeekRecord<P>] {
        &self.weeks
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_week(&self) -> Option<&WeekRecord<P>> {
        self.weeks.get(self.current_index)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Apply the outcome of a load. The loading flag is cleared either way;
    /// a failed load keeps the previous weeks.
    pub fn finish_load(
        &mut self,
        result: Result<Vec<WeekRecord<P>>, FeedError>,
    ) -> Result<usize, FeedError> {
        self.loading = false;
        let weeks = result?;
        self.weeks = weeks;
        self.current_index = 0;
        Ok(self.weeks.len())
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.weeks.len()
    }

    pub fn prev_week(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.current_index -= 1;
        debug!("prev week -> {}", self.current_index);
        true
    }

    pub fn next_week(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current_index += 1;
        debug!("next week -> {}", self.current_index);
        true
    }

    /// Jump straight to week `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.weeks.len() {
            return false;
        }
        self.current_index = index;
        true
    }

    pub fn jump_to_current_week(&mut self, today: NaiveDate) -> Result<usize, NavError> {
        match find_index_for_date(today, &self.weeks) {
            Some(idx) => {
                self.current_index = idx;
                Ok(idx)
            }
            None => {
                warn!("{} is not covered by any of {} weeks", today, self.weeks.len());
                Err(NavError::NotFoundInSchedule)
            }
        }
    }

    pub fn apply_swipe(&mut self, swipe: Swipe) -> bool {
        match swipe {
            Swipe::Prev => self.prev_week(),
            Swipe::Next => self.next_week(),
        }
    }
}

impl<P: DeserializeOwned> WeekScheduleNavigator<P> {
    /// Blocking load through `loader`.
    pub fn load(&mut self, loader: &ScheduleLoader<P>) -> Result<usize, FeedError> {
        self.begin_load();
        let result = loader.load();
        self.finish_load(result)
    }
}

// ─── Swipe gestures ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Prev,
    Next,
}

/// Turns a press/release pair of horizontal positions into a swipe.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: i32,
    start_x: Option<i32>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold: threshold.abs(),
            start_x: None,
        }
    }

    pub fn press(&mut self, x: i32) {
        self.start_x = Some(x);
    }

    pub fn release(&mut self, x: i32) -> Option<Swipe> {
        let start = self.start_x.take()?;
        let dx = x - start;
        if dx > self.threshold {
            Some(Swipe::Prev)
        } else if dx < -self.threshold {
            Some(Swipe::Next)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SciencePayload;
    use crate::schedule::loader::stub::StubSource;

    fn navigator(n: usize) -> WeekScheduleNavigator<SciencePayload> {
        let weeks = (0..n)
            .map(|i| WeekRecord {
                from: format!("{:02}-Jan", i * 7 + 1),
                to: format!("{:02}-Jan", i * 7 + 7),
                payload: SciencePayload::default(),
            })
            .collect();
        let mut nav = WeekScheduleNavigator::new();
        nav.finish_load(Ok(weeks)).unwrap();
        nav
    }

    #[test]
    fn prev_at_start_stays_put() {
        let mut nav = navigator(3);
        assert!(!nav.can_go_prev());
        assert!(!nav.prev_week());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn next_at_end_stays_put() {
        let mut nav = navigator(3);
        nav.select(2);
        assert!(!nav.can_go_next());
        assert!(!nav.next_week());
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn steps_by_exactly_one() {
        let mut nav = navigator(4);
        for expected in 1..4 {
            assert!(nav.next_week());
            assert_eq!(nav.current_index(), expected);
        }
        for expected in (0..3).rev() {
            assert!(nav.prev_week());
            assert_eq!(nav.current_index(), expected);
        }
    }

    #[test]
    fn empty_schedule_never_moves() {
        let mut nav: WeekScheduleNavigator<SciencePayload> = WeekScheduleNavigator::new();
        assert!(!nav.next_week());
        assert!(!nav.prev_week());
        assert!(nav.current_week().is_none());
    }

    #[test]
    fn jump_to_current_week_sets_index() {
        let mut nav = navigator(3);
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(nav.jump_to_current_week(today), Ok(1));
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn jump_not_found_leaves_index() {
        let mut nav = navigator(3);
        nav.select(2);
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            nav.jump_to_current_week(today),
            Err(NavError::NotFoundInSchedule)
        );
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn reload_resets_index() {
        let mut nav = navigator(3);
        nav.select(2);
        let loader = ScheduleLoader::new(Box::new(StubSource(Ok(
            r#"[{"from":"01-Feb","to":"07-Feb","study":[]},{"from":"08-Feb","to":"14-Feb"}]"#
                .to_string(),
        ))));
        assert_eq!(nav.load(&loader).unwrap(), 2);
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.is_loading());
    }

    #[test]
    fn failed_load_keeps_weeks_and_clears_loading() {
        let mut nav = navigator(2);
        nav.select(1);
        let loader = ScheduleLoader::new(Box::new(StubSource(Err(500))));
        assert!(nav.load(&loader).is_err());
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.current_index(), 1);
        assert!(!nav.is_loading());
    }

    #[test]
    fn loading_flag_is_set_between_begin_and_finish() {
        let mut nav: WeekScheduleNavigator<SciencePayload> = WeekScheduleNavigator::new();
        nav.begin_load();
        assert!(nav.is_loading());
        let _ = nav.finish_load(Err(FeedError::Status(503)));
        assert!(!nav.is_loading());
        assert!(nav.is_empty());
    }

    #[test]
    fn left_swipe_past_threshold_moves_next_once() {
        let mut nav = navigator(3);
        let mut tracker = SwipeTracker::default();
        tracker.press(100);
        let swipe = tracker.release(55);
        assert_eq!(swipe, Some(Swipe::Next));
        assert!(nav.apply_swipe(Swipe::Next));
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn short_swipe_does_nothing() {
        let mut tracker = SwipeTracker::default();
        tracker.press(100);
        assert_eq!(tracker.release(70), None);
        tracker.press(100);
        assert_eq!(tracker.release(140), None);
    }

    #[test]
    fn right_swipe_moves_prev() {
        let mut tracker = SwipeTracker::default();
        tracker.press(10);
        assert_eq!(tracker.release(51), Some(Swipe::Prev));
    }

    #[test]
    fn release_clears_start() {
        let mut tracker = SwipeTracker::default();
        tracker.press(100);
        assert_eq!(tracker.release(100), None);
        assert_eq!(tracker.release(0), None);
    }
}
