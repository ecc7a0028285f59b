use crate::adapters::parse_effort_date;
use crate::domain::model::SegmentId;
use crate::domain::ports::EffortLookup;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct EffortRow {
    segment_id: String,
    start_date_local: String,
}

/// Offline effort source: a CSV export with `segment_id,start_date_local` rows.
#[derive(Debug, Clone, Default)]
pub struct CsvEffortLog {
    efforts: HashMap<String, Vec<NaiveDate>>,
}

impl CsvEffortLog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        tracing::debug!("Reading effort log from {}", path.as_ref().display());
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut efforts: HashMap<String, Vec<NaiveDate>> = HashMap::new();

        for row in csv_reader.deserialize() {
            let row: EffortRow = row?;
            let date = parse_effort_date(&row.start_date_local)?;
            efforts.entry(row.segment_id).or_default().push(date);
        }

        tracing::debug!("Effort log holds {} segments", efforts.len());
        Ok(Self { efforts })
    }
}

#[async_trait]
impl EffortLookup for CsvEffortLog {
    async fn fetch_effort_dates(&self, segment: &SegmentId) -> Result<Vec<NaiveDate>> {
        Ok(self
            .efforts
            .get(segment.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_effort_count(&self, segment: &SegmentId) -> Result<u64> {
        Ok(self
            .efforts
            .get(segment.as_str())
            .map(|dates| dates.len() as u64)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::GreensError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LOG: &str = "segment_id,start_date_local
30545810,2024-03-15T06:30:00Z
30545810,2024-03-15T19:00:00Z
7492562,2024-03-16
";

    #[tokio::test]
    async fn test_reads_rows_per_segment() {
        let log = CsvEffortLog::from_reader(LOG.as_bytes()).unwrap();

        let dates = log.fetch_effort_dates(&SegmentId::from("30545810")).await.unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(log.fetch_effort_count(&SegmentId::from("7492562")).await.unwrap(), 1);
        assert!(log
            .fetch_effort_dates(&SegmentId::from("30546055"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_open_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(LOG.as_bytes()).unwrap();

        let log = CsvEffortLog::open(temp_file.path()).unwrap();
        assert_eq!(log.fetch_effort_count(&SegmentId::from("30545810")).await.unwrap(), 2);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let err = CsvEffortLog::from_reader("segment_id,start_date_local\n1,yesterday\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, GreensError::InvalidInput { .. }));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let err = CsvEffortLog::from_reader("segment_id\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GreensError::CsvError(_)));
    }
}
