pub mod task;
pub mod week;

pub use task::{AssignedUser, Role, Task};
pub use week::{
    Feed, GrammarPayload, SciencePayload, Topic, TopicSection, WeekPayload, WeekRecord,
};
