use super::{CountOutput, Formatter, iso8601_timestamp};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, output: &CountOutput) -> String {
        let direction = output
            .direction
            .map_or("null".to_string(), |d| format!(r#""{}""#, d.as_str()));
        format!(
            r#"{{"ts":"{}","t":{:.3},"count":{},"rate":{:.2},"direction":{}}}"#,
            iso8601_timestamp(),
            output.t,
            output.count,
            output.rate,
            direction
        )
    }
}
