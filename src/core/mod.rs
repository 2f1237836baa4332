pub mod icon;
pub mod route_finder;
pub mod runner;

pub use crate::domain::model::{ConversionReport, LineMatch, MatchKind};
pub use crate::domain::ports::Tool;
pub use crate::utils::error::Result;
