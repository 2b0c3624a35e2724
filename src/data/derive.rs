use std::collections::HashMap;

use super::filter::FilteredView;
use super::model::Record;

/// Default length of the ranking chart.
pub const DEFAULT_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Top-N ranking
// ---------------------------------------------------------------------------

/// The `n` records with the largest `average_score`, highest first.
/// Equal scores keep their dataset order.
pub fn top_n(view: &FilteredView<'_>, n: usize) -> Vec<Record> {
    let mut ranked: Vec<&Record> = view.records().collect();
    // `sort_by` is stable, so ties stay in view order.
    ranked.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));
    ranked.into_iter().take(n).cloned().collect()
}

// ---------------------------------------------------------------------------
// Categorical frequency
// ---------------------------------------------------------------------------

/// Number of records carrying one exposure level.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureCount {
    pub level: String,
    pub count: usize,
    /// Share of the filtered view, in percent.
    pub percent: f64,
}

/// Count records per `mean_exposure_level`, most frequent first. Equal
/// counts are ordered by the level's first appearance in the view.
pub fn exposure_distribution(view: &FilteredView<'_>) -> Vec<ExposureCount> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for record in view.records() {
        let level = record.mean_exposure_level.as_str();
        match slot.get(level) {
            Some(&i) => order[i].1 += 1,
            None => {
                slot.insert(level, order.len());
                order.push((level, 1));
            }
        }
    }

    order.sort_by(|a, b| b.1.cmp(&a.1));

    let total = view.len();
    order
        .into_iter()
        .map(|(level, count)| ExposureCount {
            level: level.to_string(),
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation set
// ---------------------------------------------------------------------------

/// One scatter point: score against spread, with hover labels.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPoint {
    pub average_score: f64,
    pub standard_deviation: f64,
    pub mean_exposure_level: String,
    pub job_title: String,
    pub major_group: String,
}

impl From<&Record> for CorrelationPoint {
    fn from(r: &Record) -> Self {
        CorrelationPoint {
            average_score: r.average_score,
            standard_deviation: r.standard_deviation,
            mean_exposure_level: r.mean_exposure_level.clone(),
            job_title: r.job_title.clone(),
            major_group: r.major_group.clone(),
        }
    }
}

/// Every record of the view, unaggregated, in view order.
pub fn correlation_set(view: &FilteredView<'_>) -> Vec<CorrelationPoint> {
    view.records().map(CorrelationPoint::from).collect()
}

// ---------------------------------------------------------------------------
// ChartTables – everything the central panel draws
// ---------------------------------------------------------------------------

/// The three chart inputs, computed once per filtered view.
#[derive(Debug, Clone, Default)]
pub struct ChartTables {
    pub top: Vec<Record>,
    pub distribution: Vec<ExposureCount>,
    pub scatter: Vec<CorrelationPoint>,
}

impl ChartTables {
    pub fn derive(view: &FilteredView<'_>, n: usize) -> Self {
        if view.is_empty() {
            return ChartTables::default();
        }
        ChartTables {
            top: top_n(view, n),
            distribution: exposure_distribution(view),
            scatter: correlation_set(view),
        }
    }
}
