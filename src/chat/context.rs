use crate::data::model::{ExposureDataset, Record, REQUIRED_COLUMNS};

/// Rows of the dataset shown to the answering service.
pub const SAMPLE_ROWS: usize = 5;

const PREAMBLE: &str = "The dataset contains job titles with their major groups, average scores \
(0 to 1, higher means more automation exposure), mean exposure levels (e.g., 'Highest exposure, \
low task variability (gradient 4)'), and standard deviations. Here are some sample rows:";

/// Build the prompt for one question: the dataset description, the first
/// [`SAMPLE_ROWS`] records as a text table, then the question itself.
pub fn build_context(dataset: &ExposureDataset, query: &str) -> String {
    let sample = &dataset.records()[..dataset.len().min(SAMPLE_ROWS)];
    format!(
        "{PREAMBLE}\n{}\nUser question: {query}\n",
        render_table(sample)
    )
}

/// Right-aligned columns with a leading row-number column. Row numbers are
/// positions in the normalized dataset, so dropped source rows leave no gaps.
fn render_table(records: &[Record]) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len() + 1);

    let mut header = vec![String::new()];
    header.extend(REQUIRED_COLUMNS.iter().map(|c| c.to_string()));
    rows.push(header);

    for (i, r) in records.iter().enumerate() {
        rows.push(vec![
            i.to_string(),
            r.major_group.clone(),
            r.job_title.clone(),
            r.mean_exposure_level.clone(),
            r.average_score.to_string(),
            r.standard_deviation.to_string(),
        ]);
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:>w$}"))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
