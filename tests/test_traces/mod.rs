pub mod generate;

pub use generate::alternating_trace;
pub use generate::step_trace;
pub use generate::still_trace;
