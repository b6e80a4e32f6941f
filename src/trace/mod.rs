pub mod sample;
pub mod source;
pub mod writer;

pub use sample::HandSample;
pub use source::{SampleSource, StdinSource, TraceFileSource, read_trace};
pub use writer::{TraceWriter, write_trace};
