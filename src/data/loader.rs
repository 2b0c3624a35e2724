use std::io::Read;

use thiserror::Error;

use super::model::{
    ExposureDataset, RawRecord, COL_AVERAGE_SCORE, COL_EXPOSURE_LEVEL, COL_JOB_TITLE,
    COL_MAJOR_GROUP, COL_STANDARD_DEVIATION,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The source cannot be read as tabular data at all. No partial dataset is
/// produced when this is returned.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("reading source: {0}")]
    Io(#[from] std::io::Error),
    #[error("source is not valid UTF-8 text")]
    Encoding,
    #[error("source is empty (no header row)")]
    Empty,
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("malformed tabular data: {0}")]
    Malformed(String),
}

impl From<csv::Error> for DataFormatError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => DataFormatError::Io(e),
            csv::ErrorKind::Utf8 { .. } => DataFormatError::Encoding,
            _ => DataFormatError::Malformed(message),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse and normalize a delimited source with a header row.
///
/// * Header names are trimmed and every `"` is removed from them.
/// * Cells are trimmed and lose one leading and one trailing `"`.
/// * `Average score` / `Standard deviation` are coerced to finite `f64`;
///   rows where either fails are dropped.
/// * Rows shorter than the header read the absent cells as empty. Rows
///   longer than the header are [`DataFormatError::Malformed`].
///
/// Columns other than the five required ones are ignored.
pub fn normalize<R: Read>(source: R, delimiter: u8) -> Result<ExposureDataset, DataFormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataFormatError::Empty);
    }

    let column = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();
    let mut dropped_rows = 0usize;

    for result in reader.records() {
        let row = result?;
        if row.len() > headers.len() {
            let line = row.position().map_or(0, |p| p.line());
            return Err(DataFormatError::Malformed(format!(
                "line {line} has {} fields, header has {}",
                row.len(),
                headers.len()
            )));
        }
        // Short rows leave the trailing columns missing.
        let raw = column.raw_record(&row);
        match raw.into_record() {
            Some(record) => records.push(record),
            None => dropped_rows += 1,
        }
    }

    if dropped_rows > 0 {
        log::debug!("Dropped {dropped_rows} rows with missing or non-numeric scores");
    }

    Ok(ExposureDataset::from_records(records, dropped_rows))
}

// ---------------------------------------------------------------------------
// Column lookup
// ---------------------------------------------------------------------------

/// Positions of the required columns within a header row.
struct ColumnIndex {
    major_group: usize,
    job_title: usize,
    exposure_level: usize,
    average_score: usize,
    standard_deviation: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String]) -> Result<Self, DataFormatError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(DataFormatError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            major_group: find(COL_MAJOR_GROUP)?,
            job_title: find(COL_JOB_TITLE)?,
            exposure_level: find(COL_EXPOSURE_LEVEL)?,
            average_score: find(COL_AVERAGE_SCORE)?,
            standard_deviation: find(COL_STANDARD_DEVIATION)?,
        })
    }

    fn raw_record(&self, row: &csv::StringRecord) -> RawRecord {
        let cell = |idx: usize| clean_cell(row.get(idx).unwrap_or(""));
        RawRecord {
            job_title: cell(self.job_title),
            major_group: cell(self.major_group),
            mean_exposure_level: cell(self.exposure_level),
            average_score: coerce_numeric(row.get(self.average_score).unwrap_or("")),
            standard_deviation: coerce_numeric(row.get(self.standard_deviation).unwrap_or("")),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell cleaning
// ---------------------------------------------------------------------------

fn clean_header(name: &str) -> String {
    name.trim().replace('"', "")
}

/// Trim and strip a single wrapping quote from each end. Interior quotes
/// survive. The result is trimmed again so `" Engineer "` and `Engineer`
/// compare equal.
pub fn clean_cell(value: &str) -> String {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.trim().to_string()
}

/// Numeric coercion: anything unparseable, empty, NaN or infinite is missing.
pub fn coerce_numeric(value: &str) -> Option<f64> {
    clean_cell(value)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::REQUIRED_COLUMNS;

    const HEADER: &str = "Major groups,Job title,mean_exposure_level,Average score,Standard deviation\n";

    fn load(body: &str) -> ExposureDataset {
        normalize(format!("{HEADER}{body}").as_bytes(), b',').unwrap()
    }

    #[test]
    fn test_clean_cell_strips_whitespace_and_wrapping_quotes() {
        assert_eq!(clean_cell("  \"Engineer\"  "), "Engineer");
        assert_eq!(clean_cell(" Engineer "), "Engineer");
        assert_eq!(clean_cell("Engineer"), "Engineer");
        assert_eq!(clean_cell("\" Engineer \""), "Engineer");
        // Only one quote comes off each end; interior quotes are untouched.
        assert_eq!(clean_cell("\"\"x\"\""), "\"x\"");
        assert_eq!(clean_cell("say \"hi\" now"), "say \"hi\" now");
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric(" 0.25 "), Some(0.25));
        assert_eq!(coerce_numeric("\"0.5\""), Some(0.5));
        assert_eq!(coerce_numeric("1e-2"), Some(0.01));
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("n/a"), None);
        assert_eq!(coerce_numeric("NaN"), None);
        assert_eq!(coerce_numeric("inf"), None);
    }

    #[test]
    fn test_rows_with_non_numeric_scores_are_dropped() {
        let ds = load(
            "Clerical,Clerk,gradient 4,0.9,0.05\n\
             Clerical,Typist,gradient 4,abc,0.04\n\
             Professionals,Analyst,gradient 1,0.3,\n\
             Professionals,Engineer,gradient 1,0.2,0.1\n\
             Services,Cook,gradient 2,,\n",
        );

        assert_eq!(ds.len(), 5 - 3);
        assert_eq!(ds.dropped_rows(), 3);
        let titles: Vec<&str> = ds.records().iter().map(|r| r.job_title.as_str()).collect();
        assert_eq!(titles, vec!["Clerk", "Engineer"]);
    }

    #[test]
    fn test_quoting_variants_normalize_to_same_value() {
        let ds = load(
            "\"\"\"Clerical\"\"\",\"  \"\"Engineer\"\"  \",gradient 1,0.1,0.1\n\
             Clerical, Engineer ,gradient 1,0.2,0.1\n\
             \"Clerical\",Engineer,\" gradient 1 \",\"0.3\",\" 0.1 \"\n",
        );

        assert_eq!(ds.len(), 3);
        for record in ds.records() {
            assert_eq!(record.job_title, "Engineer");
            assert_eq!(record.major_group, "Clerical");
            assert_eq!(record.mean_exposure_level, "gradient 1");
        }
        assert_eq!(ds.major_groups().len(), 1);
    }

    #[test]
    fn test_headers_are_trimmed_and_dequoted() {
        let source = " \"Major groups\" ,Job title , \"mean_exposure_level\",Average score,\"Standard deviation\"\n\
                      Clerical,Clerk,gradient 4,0.9,0.05\n";
        let ds = normalize(source.as_bytes(), b',').unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].average_score, 0.9);
    }

    #[test]
    fn test_extra_columns_and_order_are_irrelevant() {
        let source = "Id,Standard deviation,Job title,Average score,mean_exposure_level,Major groups\n\
                      7,0.05,Clerk,0.9,gradient 4,Clerical\n";
        let ds = normalize(source.as_bytes(), b',').unwrap();
        let r = &ds.records()[0];
        assert_eq!(r.job_title, "Clerk");
        assert_eq!(r.major_group, "Clerical");
        assert_eq!(r.standard_deviation, 0.05);
    }

    #[test]
    fn test_custom_delimiter() {
        let source = "Major groups;Job title;mean_exposure_level;Average score;Standard deviation\n\
                      Clerical;Clerk;gradient 4;0.9;0.05\n";
        let ds = normalize(source.as_bytes(), b';').unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_missing_column_is_a_format_error() {
        let source = "Major groups,Job title,Average score,Standard deviation\nA,B,0.1,0.1\n";
        let err = normalize(source.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, DataFormatError::MissingColumn("mean_exposure_level")));
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let ds = load(
            "Clerical,Clerk,gradient 4,0.9,0.05\n\
             Clerical,Typist,gradient 4,0.85\n\
             Professional,Analyst,gradient 1,0.3,0.1\n\
             Clerical\n",
        );

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dropped_rows(), 2);
        let titles: Vec<&str> = ds.records().iter().map(|r| r.job_title.as_str()).collect();
        assert_eq!(titles, vec!["Clerk", "Analyst"]);
    }

    #[test]
    fn test_rows_longer_than_header_are_a_format_error() {
        let err = normalize(
            format!("{HEADER}Clerical,Clerk,gradient 4,0.9,0.05\nClerical,Typist,gradient 4,0.85,0.04,extra\n")
                .as_bytes(),
            b',',
        )
        .unwrap_err();
        match err {
            DataFormatError::Malformed(msg) => assert!(msg.contains("line 3"), "{msg}"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_source_is_a_format_error() {
        let err = normalize("".as_bytes(), b',').unwrap_err();
        assert!(matches!(err, DataFormatError::Empty));
    }

    #[test]
    fn test_invalid_utf8_is_a_format_error() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"Cl\xffrical,Clerk,gradient 4,0.9,0.05\n");
        let err = normalize(bytes.as_slice(), b',').unwrap_err();
        assert!(matches!(err, DataFormatError::Encoding));
    }

    #[test]
    fn test_header_only_source_yields_empty_dataset() {
        let ds = load("");
        assert!(ds.is_empty());
        assert!(ds.major_groups().is_empty());
    }

    #[test]
    fn test_normalizing_normalized_output_is_a_fixed_point() {
        let first = load(
            "\" Clerical \",\"Clerk\",gradient 4,\" 0.9\",0.05\n\
             Professionals,  Analyst ,\"gradient 1\",0.3,0.1\n\
             Clerical,Typist,gradient 4,oops,0.04\n",
        );

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(REQUIRED_COLUMNS).unwrap();
        for r in first.records() {
            writer
                .write_record([
                    r.major_group.clone(),
                    r.job_title.clone(),
                    r.mean_exposure_level.clone(),
                    r.average_score.to_string(),
                    r.standard_deviation.to_string(),
                ])
                .unwrap();
        }
        let rendered = writer.into_inner().unwrap();

        let second = normalize(rendered.as_slice(), b',').unwrap();
        assert_eq!(second.records(), first.records());
        assert_eq!(second.dropped_rows(), 0);
    }
}
