use super::model::{ExposureDataset, Record};

// ---------------------------------------------------------------------------
// Filter predicate: optional exact-match constraint per categorical column
// ---------------------------------------------------------------------------

/// The two categorical constraints the side panel offers.
/// `None` means "no constraint" (the "All" entry).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub major_group: Option<String>,
    pub exposure_level: Option<String>,
}

impl FilterSelection {
    #[cfg(test)]
    pub fn major_group(value: impl Into<String>) -> Self {
        FilterSelection {
            major_group: Some(value.into()),
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn exposure_level(value: impl Into<String>) -> Self {
        FilterSelection {
            exposure_level: Some(value.into()),
            ..Default::default()
        }
    }

    /// Whether the record satisfies every active constraint.
    pub fn matches(&self, record: &Record) -> bool {
        let group_ok = self
            .major_group
            .as_deref()
            .is_none_or(|g| record.major_group == g);
        let level_ok = self
            .exposure_level
            .as_deref()
            .is_none_or(|l| record.mean_exposure_level == l);
        group_ok && level_ok
    }

    /// Drop constraints whose value no longer exists in `dataset`, so the
    /// selection is always drawn from the current vocabularies.
    pub fn retain_known(&mut self, dataset: &ExposureDataset) {
        if self
            .major_group
            .as_ref()
            .is_some_and(|g| !dataset.major_groups().contains(g))
        {
            self.major_group = None;
        }
        if self
            .exposure_level
            .as_ref()
            .is_some_and(|l| !dataset.exposure_levels().contains(l))
        {
            self.exposure_level = None;
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredView – ordered row indices into a dataset
// ---------------------------------------------------------------------------

/// A subsequence of the dataset, in original order. Never owns or mutates
/// the records it refers to.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a ExposureDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every record.
    pub fn full(dataset: &'a ExposureDataset) -> Self {
        FilteredView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Narrow this view further; relative order is preserved.
    pub fn refine(&self, selection: &FilterSelection) -> FilteredView<'a> {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| selection.matches(&self.dataset.records()[i]))
            .collect();
        FilteredView {
            dataset: self.dataset,
            indices,
        }
    }

    /// Positions in the underlying dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Apply `selection` to the full dataset.
pub fn apply<'a>(dataset: &'a ExposureDataset, selection: &FilterSelection) -> FilteredView<'a> {
    FilteredView::full(dataset).refine(selection)
}
