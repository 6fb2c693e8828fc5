//! Query parameters shared by the list endpoints.

use chrono::{DateTime, SecondsFormat, Utc};

/// Optional query parameters accepted by list endpoints.
///
/// Fields holding their zero value (empty string, zero, `None`) are omitted
/// from the encoded query string rather than sent as explicit empty values.
///
/// At most one of `skip_token` and `next_batch_token` should be set per
/// call; the two pagination styles belong to different API families and the
/// encoder does not police the mix.
#[derive(Debug, Clone, Default)]
pub struct QueryParameters {
    pub order_by: String,
    pub top: i64,
    pub skip_token: String,
    pub next_batch_token: String,

    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,

    pub detected_start_date_time: Option<DateTime<Utc>>,
    pub detected_end_date_time: Option<DateTime<Utc>>,

    pub first_seen_start_date_time: Option<DateTime<Utc>>,
    pub first_seen_end_date_time: Option<DateTime<Utc>>,

    pub last_detected_start_date_time: Option<DateTime<Utc>>,
    pub last_detected_end_date_time: Option<DateTime<Utc>>,
}

impl QueryParameters {
    /// Encodes the non-zero fields as wire key/value pairs.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push_str(&mut pairs, "orderBy", &self.order_by);
        if self.top != 0 {
            pairs.push(("top".to_string(), self.top.to_string()));
        }
        push_str(&mut pairs, "skipToken", &self.skip_token);
        push_str(&mut pairs, "nextBatchToken", &self.next_batch_token);
        push_time(&mut pairs, "startDateTime", self.start_date_time);
        push_time(&mut pairs, "endDateTime", self.end_date_time);
        push_time(
            &mut pairs,
            "detectedStartDateTime",
            self.detected_start_date_time,
        );
        push_time(
            &mut pairs,
            "detectedEndDateTime",
            self.detected_end_date_time,
        );
        push_time(
            &mut pairs,
            "firstSeenStartDateTime",
            self.first_seen_start_date_time,
        );
        push_time(
            &mut pairs,
            "firstSeenEndDateTime",
            self.first_seen_end_date_time,
        );
        push_time(
            &mut pairs,
            "lastDetectedStartDateTime",
            self.last_detected_start_date_time,
        );
        push_time(
            &mut pairs,
            "lastDetectedEndDateTime",
            self.last_detected_end_date_time,
        );
        pairs
    }
}

fn push_str(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    if !value.is_empty() {
        pairs.push((key.to_string(), value.to_string()));
    }
}

fn push_time(pairs: &mut Vec<(String, String)>, key: &str, value: Option<DateTime<Utc>>) {
    if let Some(value) = value {
        pairs.push((
            key.to_string(),
            value.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn all_zero_fields_encode_to_nothing() {
        assert!(QueryParameters::default().pairs().is_empty());
    }

    #[test]
    fn single_field_encodes_to_single_pair() {
        let params = QueryParameters {
            top: 50,
            ..Default::default()
        };
        assert_eq!(params.pairs(), vec![("top".to_string(), "50".to_string())]);
    }

    #[test]
    fn timestamps_encode_as_rfc3339() {
        let params = QueryParameters {
            start_date_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(
            params.pairs(),
            vec![(
                "startDateTime".to_string(),
                "2024-05-01T12:00:00Z".to_string()
            )]
        );
    }

    #[test]
    fn mixed_fields_keep_wire_names() {
        let params = QueryParameters {
            order_by: "createdDateTime desc".to_string(),
            top: 10,
            skip_token: "token-a".to_string(),
            ..Default::default()
        };
        let pairs = params.pairs();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].0, "orderBy");
        assert_eq!(pairs[1].0, "top");
        assert_eq!(pairs[2].0, "skipToken");
    }
}
