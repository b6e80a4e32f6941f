use super::{CountOutput, Formatter, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, output: &CountOutput) -> String {
        let direction = output.direction.map_or("", |d| d.as_str());
        format!(
            "{},{:.3},{},{:.2},{}",
            iso8601_timestamp(),
            output.t,
            output.count,
            output.rate,
            direction
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,t,count,rate,direction")
    }
}
