pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{Clock, FixedClock, SystemClock};
pub use config::GameConfig;
pub use error::{HuzzError, Result};
pub use types::{LessonId, QuestionId};
