use serde::{Deserialize, Serialize};

/// One reading of the two wrist positions
///
/// `t` is a session-relative timestamp in seconds. Positions are vertical
/// image coordinates, normalized so that larger values are lower in the
/// frame. A hand the upstream tracker lost is `None`; on the wire that is
/// a JSON `null`, and an omitted field reads back the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandSample {
    pub t: f64,
    #[serde(default)]
    pub left_y: Option<f32>,
    #[serde(default)]
    pub right_y: Option<f32>,
}

impl HandSample {
    pub fn new(t: f64, left_y: Option<f32>, right_y: Option<f32>) -> Self {
        Self {
            t,
            left_y,
            right_y,
        }
    }

    /// Both hands visible in this sample
    pub fn is_paired(&self) -> bool {
        self.left_y.is_some() && self.right_y.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_line() {
        let sample: HandSample =
            serde_json::from_str(r#"{"t": 1.25, "left_y": 0.42, "right_y": 0.58}"#).unwrap();

        assert_eq!(sample.t, 1.25);
        assert_eq!(sample.left_y, Some(0.42));
        assert_eq!(sample.right_y, Some(0.58));
        assert!(sample.is_paired());
    }

    #[test]
    fn test_null_and_missing_fields_are_absent_hands() {
        let with_null: HandSample =
            serde_json::from_str(r#"{"t": 2.0, "left_y": null, "right_y": 0.5}"#).unwrap();
        let omitted: HandSample = serde_json::from_str(r#"{"t": 2.0, "right_y": 0.5}"#).unwrap();

        assert_eq!(with_null.left_y, None);
        assert_eq!(with_null, omitted);
        assert!(!with_null.is_paired());
    }

    #[test]
    fn test_serializes_absent_hand_as_null() {
        let sample = HandSample::new(0.5, None, Some(0.7));
        let line = serde_json::to_string(&sample).unwrap();

        assert!(line.contains(r#""left_y":null"#), "line was: {line}");
        let back: HandSample = serde_json::from_str(&line).unwrap();
        assert_eq!(back, sample);
    }
}
