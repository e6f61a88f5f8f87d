pub mod loader;
pub mod matcher;
pub mod navigator;

pub use loader::ScheduleLoader;
pub use navigator::{NavError, Swipe, SwipeTracker, WeekScheduleNavigator};
