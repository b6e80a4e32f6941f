pub mod crossing;
pub mod history;
pub mod rate;

pub use crossing::{CrossingDetector, CrossingDirection, CrossingEvent};
pub use history::{Hand, PositionHistory};
pub use rate::RateWindow;
