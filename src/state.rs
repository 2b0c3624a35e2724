use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::chat::answer::Answerer;
use crate::chat::session::ConversationSession;
use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::data::cache::DatasetCache;
use crate::data::derive::ChartTables;
use crate::data::filter::{apply, FilterSelection};
use crate::data::model::ExposureDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Normalized datasets keyed by source content.
    cache: DatasetCache,

    /// Loaded dataset (None until a file is opened).
    pub dataset: Option<Arc<ExposureDataset>>,

    /// Where `dataset` was read from.
    pub source_path: Option<PathBuf>,

    /// Current major group / exposure level selection.
    pub filters: FilterSelection,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Chart inputs for the current filtered view (cached).
    pub charts: ChartTables,

    /// Colours per major group (bar chart).
    pub group_colors: Option<ColorMap>,

    /// Colours per exposure level (distribution and scatter).
    pub level_colors: Option<ColorMap>,

    /// Question/answer history.
    pub session: ConversationSession,

    /// Text currently in the question box.
    pub query_input: String,

    answerer: Box<dyn Answerer>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, answerer: Box<dyn Answerer>) -> Self {
        Self {
            cache: DatasetCache::new(config.delimiter_byte()),
            config,
            dataset: None,
            source_path: None,
            filters: FilterSelection::default(),
            visible_indices: Vec::new(),
            charts: ChartTables::default(),
            group_colors: None,
            level_colors: None,
            session: ConversationSession::new(),
            query_input: String::new(),
            answerer,
            status_message: None,
        }
    }

    pub fn service_name(&self) -> &str {
        self.answerer.service_name()
    }

    /// Load (or fetch from cache) the dataset at `path`. On failure the
    /// previous dataset stays in place and the error goes to the status bar.
    pub fn open_path(&mut self, path: &Path) {
        match self.cache.load(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {} ({} rows dropped, {} sources cached)",
                    dataset.len(),
                    path.display(),
                    dataset.dropped_rows(),
                    self.cache.source_count()
                );
                if dataset.is_empty() {
                    log::warn!("{} has no rows with numeric scores", path.display());
                }
                self.source_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset: revalidate filters, colours and charts.
    pub fn set_dataset(&mut self, dataset: Arc<ExposureDataset>) {
        self.filters.retain_known(&dataset);
        self.group_colors = Some(ColorMap::new(dataset.major_groups()));
        self.level_colors = Some(ColorMap::new(dataset.exposure_levels()));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered view and its charts after a filter change.
    pub fn refilter(&mut self) {
        match &self.dataset {
            Some(ds) => {
                let view = apply(ds, &self.filters);
                self.charts = ChartTables::derive(&view, self.config.top_n);
                self.visible_indices = view.indices().to_vec();
            }
            None => {
                self.charts = ChartTables::default();
                self.visible_indices.clear();
            }
        }
    }

    pub fn set_major_group(&mut self, group: Option<String>) {
        if self.filters.major_group != group {
            self.filters.major_group = group;
            self.refilter();
        }
    }

    pub fn set_exposure_level(&mut self, level: Option<String>) {
        if self.filters.exposure_level != level {
            self.filters.exposure_level = level;
            self.refilter();
        }
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterSelection::default();
        self.refilter();
    }

    /// Send the question box to the answering service. The box is cleared
    /// once a turn has been recorded.
    pub fn submit_query(&mut self) {
        let empty = ExposureDataset::default();
        let dataset = self.dataset.as_deref().unwrap_or(&empty);
        if self
            .session
            .submit(&self.query_input, dataset, self.answerer.as_ref())
            .is_some()
        {
            self.query_input.clear();
        }
    }
}
