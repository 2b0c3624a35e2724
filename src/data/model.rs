use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Column names of the raw source
// ---------------------------------------------------------------------------

pub const COL_MAJOR_GROUP: &str = "Major groups";
pub const COL_JOB_TITLE: &str = "Job title";
pub const COL_EXPOSURE_LEVEL: &str = "mean_exposure_level";
pub const COL_AVERAGE_SCORE: &str = "Average score";
pub const COL_STANDARD_DEVIATION: &str = "Standard deviation";

/// Every column the loader requires, in the order the context table renders them.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_MAJOR_GROUP,
    COL_JOB_TITLE,
    COL_EXPOSURE_LEVEL,
    COL_AVERAGE_SCORE,
    COL_STANDARD_DEVIATION,
];

// ---------------------------------------------------------------------------
// RawRecord – a row after text cleaning, before numeric validation
// ---------------------------------------------------------------------------

/// A cleaned source row whose numeric fields may have failed coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub job_title: String,
    pub major_group: String,
    pub mean_exposure_level: String,
    pub average_score: Option<f64>,
    pub standard_deviation: Option<f64>,
}

impl RawRecord {
    /// Promote to a [`Record`] when both numeric fields were coerced.
    pub fn into_record(self) -> Option<Record> {
        let (Some(average_score), Some(standard_deviation)) =
            (self.average_score, self.standard_deviation)
        else {
            return None;
        };
        Some(Record {
            job_title: self.job_title,
            major_group: self.major_group,
            mean_exposure_level: self.mean_exposure_level,
            average_score,
            standard_deviation,
        })
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the normalized dataset
// ---------------------------------------------------------------------------

/// A job title with its automation-exposure scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub job_title: String,
    pub major_group: String,
    /// Ordinal-like label, e.g. "Highest exposure, low task variability (gradient 4)".
    pub mean_exposure_level: String,
    pub average_score: f64,
    pub standard_deviation: f64,
}

// ---------------------------------------------------------------------------
// ExposureDataset – the normalized, immutable dataset
// ---------------------------------------------------------------------------

/// The normalized dataset with the distinct values the filter widgets offer.
#[derive(Debug, Clone, Default)]
pub struct ExposureDataset {
    records: Vec<Record>,
    major_groups: BTreeSet<String>,
    exposure_levels: BTreeSet<String>,
    dropped_rows: usize,
}

impl ExposureDataset {
    /// Build the vocabularies from the retained records.
    pub fn from_records(records: Vec<Record>, dropped_rows: usize) -> Self {
        let major_groups = records.iter().map(|r| r.major_group.clone()).collect();
        let exposure_levels = records
            .iter()
            .map(|r| r.mean_exposure_level.clone())
            .collect();
        ExposureDataset {
            records,
            major_groups,
            exposure_levels,
            dropped_rows,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sorted distinct major groups.
    pub fn major_groups(&self) -> &BTreeSet<String> {
        &self.major_groups
    }

    /// Sorted distinct exposure levels.
    pub fn exposure_levels(&self) -> &BTreeSet<String> {
        &self.exposure_levels
    }

    /// Source rows excluded because a numeric field failed coercion.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(score: Option<f64>, sd: Option<f64>) -> RawRecord {
        RawRecord {
            job_title: "Clerk".into(),
            major_group: "Clerical".into(),
            mean_exposure_level: "gradient 4".into(),
            average_score: score,
            standard_deviation: sd,
        }
    }

    #[test]
    fn test_into_record_requires_both_numeric_fields() {
        assert!(raw(Some(0.5), Some(0.1)).into_record().is_some());
        assert!(raw(None, Some(0.1)).into_record().is_none());
        assert!(raw(Some(0.5), None).into_record().is_none());
        assert!(raw(None, None).into_record().is_none());
    }

    #[test]
    fn test_vocabularies_are_sorted_and_distinct() {
        let records = vec![
            raw(Some(0.9), Some(0.1)).into_record().unwrap(),
            Record {
                major_group: "Professionals".into(),
                mean_exposure_level: "gradient 1".into(),
                ..raw(Some(0.3), Some(0.1)).into_record().unwrap()
            },
            raw(Some(0.8), Some(0.1)).into_record().unwrap(),
        ];
        let ds = ExposureDataset::from_records(records, 2);

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.dropped_rows(), 2);
        assert_eq!(
            ds.major_groups().iter().collect::<Vec<_>>(),
            vec!["Clerical", "Professionals"]
        );
        assert_eq!(
            ds.exposure_levels().iter().collect::<Vec<_>>(),
            vec!["gradient 1", "gradient 4"]
        );
    }
}
