//! Visitor record type and its one-line CSV encoding.
//!
//! The file format is deliberately naive: fields are joined with a comma and
//! never quoted. Only the last field (`longLat`) may itself contain commas,
//! because a line is split into at most four fields.

use serde::{Deserialize, Serialize};

use crate::config::{FIELD_DELIMITER, MIN_SWEEP_FIELD_COUNT, RECORD_FIELD_COUNT};

/// One logged visit.
///
/// Serialized with the camelCase field names clients send and receive:
/// `ip`, `region`, `dateTime`, `longLat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorRecord {
    pub ip: String,
    pub region: String,
    /// ISO-8601-like timestamp; the part before `T` is the de-duplication day.
    pub date_time: String,
    /// Raw coordinate pair exactly as the client sent it.
    pub long_lat: String,
}

impl VisitorRecord {
    pub fn new(
        ip: impl Into<String>,
        region: impl Into<String>,
        date_time: impl Into<String>,
        long_lat: impl Into<String>,
    ) -> Self {
        Self {
            ip: ip.into(),
            region: region.into(),
            date_time: date_time.into(),
            long_lat: long_lat.into(),
        }
    }

    /// Calendar day this visit counts against for de-duplication.
    pub fn date_key(&self) -> &str {
        date_portion(&self.date_time)
    }

    /// Whether the record can be written without corrupting the file.
    ///
    /// No field may contain a line break, and only `longLat` may contain the
    /// delimiter.
    pub fn is_storable(&self) -> bool {
        let fields = [&self.ip, &self.region, &self.date_time, &self.long_lat];
        if fields
            .iter()
            .any(|f| f.contains(|c: char| c == '\n' || c == '\r'))
        {
            return false;
        }
        !fields[..RECORD_FIELD_COUNT - 1]
            .iter()
            .any(|f| f.contains(FIELD_DELIMITER))
    }

    /// Encodes the record as a line, without the trailing newline.
    pub fn to_line(&self) -> String {
        let delimiter = FIELD_DELIMITER.to_string();
        [
            self.ip.as_str(),
            self.region.as_str(),
            self.date_time.as_str(),
            self.long_lat.as_str(),
        ]
        .join(delimiter.as_str())
    }

    /// Decodes a record line. Lines with fewer than four fields yield `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        match split_fields(line).as_slice() {
            [ip, region, date_time, long_lat] => {
                Some(Self::new(*ip, *region, *date_time, *long_lat))
            }
            _ => None,
        }
    }
}

/// Substring of a timestamp before the first `T` (the whole string if none).
pub fn date_portion(date_time: &str) -> &str {
    date_time.split('T').next().unwrap_or(date_time)
}

/// Splits a line into at most four fields; the last keeps any extra commas.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.splitn(RECORD_FIELD_COUNT, FIELD_DELIMITER).collect()
}

/// Returns `(ip, dateTime)` for lines the duplicate scan and sweep can use.
pub fn key_fields(line: &str) -> Option<(&str, &str)> {
    let fields = split_fields(line);
    if fields.len() < MIN_SWEEP_FIELD_COUNT {
        return None;
    }
    Some((fields[0], fields[2]))
}

/// Splits file contents into `(header, record lines)`.
///
/// Surrounding whitespace is ignored, so a trailing newline never produces an
/// empty record line. `\r` line endings are tolerated.
pub fn split_contents(contents: &str) -> (&str, Vec<&str>) {
    let mut lines = contents
        .trim()
        .split('\n')
        .map(|line| line.trim_end_matches('\r'));
    let header = lines.next().unwrap_or("");
    (header, lines.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_keeps_comma_in_long_lat() {
        let record = VisitorRecord::new("1.2.3.4", "NA", "2024-01-01T10:00:00Z", "1,2");
        let line = record.to_line();
        assert_eq!(line, "1.2.3.4,NA,2024-01-01T10:00:00Z,1,2");
        assert_eq!(VisitorRecord::from_line(&line), Some(record));
    }

    #[test]
    fn test_short_line_is_rejected() {
        assert_eq!(VisitorRecord::from_line("1.2.3.4,NA,2024-01-01"), None);
        assert_eq!(VisitorRecord::from_line(""), None);
    }

    #[test]
    fn test_date_portion() {
        assert_eq!(date_portion("2024-01-01T10:00:00Z"), "2024-01-01");
        assert_eq!(date_portion("2024-01-01"), "2024-01-01");
        assert_eq!(date_portion(""), "");
    }

    #[test]
    fn test_key_fields_needs_three_fields() {
        assert_eq!(
            key_fields("9.9.9.9,EU,2024-02-02T00:00:00Z"),
            Some(("9.9.9.9", "2024-02-02T00:00:00Z"))
        );
        assert_eq!(key_fields("9.9.9.9,EU"), None);
    }

    #[test]
    fn test_is_storable() {
        assert!(VisitorRecord::new("a", "b", "c", "1,2").is_storable());
        assert!(!VisitorRecord::new("a,b", "b", "c", "d").is_storable());
        assert!(!VisitorRecord::new("a", "b,c", "c", "d").is_storable());
        assert!(!VisitorRecord::new("a", "b", "c", "d\ne").is_storable());
        assert!(!VisitorRecord::new("a", "b", "c\r", "d").is_storable());
    }

    #[test]
    fn test_split_contents() {
        let (header, lines) = split_contents("IP,Region,DateTime,longLat\r\na,b,c,d\r\n\n");
        assert_eq!(header, "IP,Region,DateTime,longLat");
        assert_eq!(lines, vec!["a,b,c,d"]);

        let (header, lines) = split_contents("IP,Region,DateTime,longLat\n");
        assert_eq!(header, "IP,Region,DateTime,longLat");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let record = VisitorRecord::new("1.2.3.4", "NA", "2024-01-01T10:00:00Z", "1,2");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ip": "1.2.3.4",
                "region": "NA",
                "dateTime": "2024-01-01T10:00:00Z",
                "longLat": "1,2"
            })
        );
    }
}
