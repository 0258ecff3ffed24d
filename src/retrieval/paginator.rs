use crate::config::QueryConfig;
use crate::query::{ContinuationToken, FetchError, QueryClient, QueryHandle, Record};

/// Pulls the log line out of a record's JSON payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineExtractor {
    payload_field: String,
    line_field: String,
}

impl LineExtractor {
    pub fn new(payload_field: impl Into<String>, line_field: impl Into<String>) -> Self {
        Self {
            payload_field: payload_field.into(),
            line_field: line_field.into(),
        }
    }

    pub fn from_config(query: &QueryConfig) -> Self {
        Self::new(&query.payload_field, &query.line_field)
    }

    /// `None` when the payload is missing, is not a JSON object, or its line
    /// is absent, not a string, or empty.
    pub fn extract(&self, record: &Record) -> Option<String> {
        let payload = record.get(&self.payload_field)?;
        let value: serde_json::Value = serde_json::from_str(payload).ok()?;
        match value.get(&self.line_field)? {
            serde_json::Value::String(line) if !line.is_empty() => Some(line.clone()),
            _ => None,
        }
    }
}

impl Default for LineExtractor {
    fn default() -> Self {
        Self::from_config(&QueryConfig::default())
    }
}

/// Everything read for one query handle.
#[derive(Debug, Default)]
pub struct Drained {
    pub lines: Vec<String>,
    pub pages: usize,
    /// Records that yielded no line.
    pub skipped: usize,
    /// The fetch error that stopped draining early, if any.
    pub error: Option<FetchError>,
}

/// Fetch pages for `handle` until the service stops returning a
/// continuation token, extracting one line per usable record.
///
/// A failed fetch ends draining; lines already extracted are kept.
pub async fn drain<C>(client: &C, handle: &QueryHandle, extractor: &LineExtractor) -> Drained
where
    C: QueryClient + ?Sized,
{
    let mut drained = Drained::default();
    let mut token: Option<ContinuationToken> = None;

    loop {
        let page = match client.fetch_page(handle, token.as_ref()).await {
            Ok(page) => page,
            Err(e) => {
                drained.error = Some(e);
                break;
            }
        };
        drained.pages += 1;

        for record in &page.records {
            match extractor.extract(record) {
                Some(line) => drained.lines.push(line),
                None => drained.skipped += 1,
            }
        }

        tracing::trace!(
            query_id = %handle,
            page = drained.pages,
            records = page.records.len(),
            has_more = page.continuation.is_some(),
            "Fetched result page"
        );

        match page.continuation {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    drained
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(value: &str) -> Record {
        Record::from_pairs([("@message", value)])
    }

    #[test]
    fn test_extracts_nested_log() {
        let extractor = LineExtractor::default();
        let record = message(r#"{"log":"hello world","stream":"stdout"}"#);
        assert_eq!(extractor.extract(&record), Some("hello world".to_string()));
    }

    #[test]
    fn test_unusable_records_skipped() {
        let extractor = LineExtractor::default();
        assert_eq!(extractor.extract(&message("not json")), None);
        assert_eq!(extractor.extract(&message(r#"{"stream":"stdout"}"#)), None);
        assert_eq!(extractor.extract(&message(r#"{"log":""}"#)), None);
        assert_eq!(extractor.extract(&message(r#"{"log":42}"#)), None);
        assert_eq!(extractor.extract(&message(r#"["log"]"#)), None);
        assert_eq!(extractor.extract(&Record::from_pairs([("@ptr", "x")])), None);
    }

    #[test]
    fn test_custom_fields() {
        let extractor = LineExtractor::new("payload", "msg");
        let record = Record::from_pairs([("@ptr", "x"), ("payload", r#"{"msg":"m"}"#)]);
        assert_eq!(extractor.extract(&record), Some("m".to_string()));
    }
}
