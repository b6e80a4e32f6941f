use super::{CountOutput, Formatter};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, output: &CountOutput) -> String {
        let label = match output.direction {
            Some(direction) if self.verbose => format!("crossing ({direction})"),
            Some(_) => "crossing".to_string(),
            None => "status".to_string(),
        };
        format!(
            "[{:>8.2}s] {:<32} count: {:>4}  rate: {:>6.1}/min",
            output.t, label, output.count, output.rate
        )
    }
}
