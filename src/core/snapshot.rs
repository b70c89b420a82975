//! Parsing of the locally stored rate table.
//!
//! The snapshot is a comma separated table whose first row is a header. Each
//! data row must have exactly two cells, a currency label and the rate text;
//! anything else is skipped. Rates are kept as the text found in the file.

use super::error::RateError;
use csv::{ByteRecord, ReaderBuilder};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSnapshotRow {
    pub currency: String,
    pub rate: String,
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<RateSnapshotRow>, RateError> {
    let path = path.as_ref();
    debug!("Loading rate snapshot from {}", path.display());
    let file = std::fs::File::open(path).map_err(|e| RateError::SourceUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_snapshot(file).map_err(|reason| RateError::SourceUnavailable {
        path: path.display().to_string(),
        reason,
    })
}

fn parse_snapshot<R: Read>(source: R) -> Result<Vec<RateSnapshotRow>, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    loop {
        match reader.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(e.to_string()),
        }
        if record.len() != 2 {
            debug!(cells = record.len(), "Skipping snapshot row");
            continue;
        }
        // Rates are display-only, so undecodable bytes are kept as-is.
        rows.push(RateSnapshotRow {
            currency: String::from_utf8_lossy(&record[0]).into_owned(),
            rate: String::from_utf8_lossy(&record[1]).into_owned(),
        });
    }
    debug!("Parsed {} snapshot rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row(currency: &str, rate: &str) -> RateSnapshotRow {
        RateSnapshotRow {
            currency: currency.to_string(),
            rate: rate.to_string(),
        }
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let doc = "Currency,Rate\nUSD,150.25\nEUR,160.10\nGBP,190.5\n";
        let rows = parse_snapshot(doc.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![row("USD", "150.25"), row("EUR", "160.10"), row("GBP", "190.5")]
        );
    }

    #[test]
    fn test_parse_skips_rows_with_wrong_cell_count() {
        let doc = "Currency,Rate\nUSD,150.25\nEUR,160.10,extra\nCHF\nAUD,98.7\n";
        let rows = parse_snapshot(doc.as_bytes()).unwrap();
        assert_eq!(rows, vec![row("USD", "150.25"), row("AUD", "98.7")]);
    }

    #[test]
    fn test_parse_keeps_rate_text_verbatim() {
        let mut doc = b"Currency,Rate\nUSD,approx. 150\nEUR,".to_vec();
        doc.extend_from_slice(&[0xff, b'1', b'6', b'0', b'\n']);
        let rows = parse_snapshot(doc.as_slice()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rate, "approx. 150");
        assert_eq!(rows[1].rate, "\u{fffd}160");
    }

    #[test]
    fn test_header_only_document_is_empty() {
        let rows = parse_snapshot("Currency,Rate\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_load_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Currency,Rate\nUSD,150.25\nEUR,160.10").unwrap();
        let rows = load_snapshot(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(err, RateError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_unreadable_path_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(dir.path()).unwrap_err();
        match err {
            RateError::SourceUnavailable { path, .. } => {
                assert_eq!(path, dir.path().display().to_string());
            }
            other => panic!("Expected SourceUnavailable, got {other:?}"),
        }
    }
}
