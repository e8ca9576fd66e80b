use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::filter::{filtered_indices, init_filter_state, Dimension, FilterState, FilteredView};
use crate::data::metrics::{self, DashboardMetrics};
use crate::data::model::{CellValue, Dataset};
use crate::error::SchemaValidationError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Startup configuration (revenue target, default source).
    pub config: DashboardConfig,

    /// Loaded datasets by source identity.
    cache: DatasetCache,

    /// Path of the current source.
    pub source: Option<PathBuf>,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<Dataset>>,

    /// Month / Branch selections.
    pub filters: FilterState,

    /// Indices of rows passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics for `visible_indices`.
    pub metrics: DashboardMetrics,

    /// Line-chart series colours, one per branch.
    pub unit_colors: ColorMap,

    /// Pie-slice colours, one per load type.
    pub load_type_colors: ColorMap,

    /// Set when the last load failed schema validation.
    pub schema_error: Option<SchemaValidationError>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            metrics: DashboardMetrics {
                target: config.revenue_target,
                ..Default::default()
            },
            config,
            cache: DatasetCache::new(),
            source: None,
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            unit_colors: ColorMap::default(),
            load_type_colors: ColorMap::default(),
            schema_error: None,
            status_message: None,
        }
    }

    /// Load the configured source if it exists on disk.
    pub fn load_configured_source(&mut self) {
        let path = self.config.data_path.clone();
        if path.exists() {
            self.load_source(&path);
        } else {
            log::info!("Configured source {} not found", path.display());
        }
    }

    /// Load (or fetch from cache) `path` and make it the current dataset.
    ///
    /// On failure nothing from a previous dataset stays on screen.
    pub fn load_source(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        match self.cache.get_or_load(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.schema_error = e.schema().cloned();
                self.status_message = Some(format!("Error: {e}"));
                self.dataset = None;
                self.filters = FilterState::default();
                self.refilter();
            }
        }
    }

    /// Drop the cached copy of the current source and read it again.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.cache.invalidate(&path);
            self.load_source(&path);
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.filters = init_filter_state(&dataset);
        self.unit_colors = ColorMap::new(&dataset.units);

        let all: Vec<usize> = (0..dataset.len()).collect();
        let tonnage = metrics::load_type_tonnage(&FilteredView::new(&dataset, &all));
        self.load_type_colors = ColorMap::new(&tonnage.load_types());

        self.dataset = Some(dataset);
        self.schema_error = None;
        self.status_message = None;
        self.refilter();
    }

    /// The currently visible rows.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        self.dataset
            .as_deref()
            .map(|ds| FilteredView::new(ds, &self.visible_indices))
    }

    /// Recompute `visible_indices` and metrics after a filter change.
    pub fn refilter(&mut self) {
        let target = self.config.revenue_target;
        match &self.dataset {
            Some(ds) => {
                self.visible_indices = filtered_indices(ds, &self.filters);
                self.metrics = metrics::compute(&FilteredView::new(ds, &self.visible_indices), target);
                log::debug!("{} of {} rows visible", self.visible_indices.len(), ds.len());
            }
            None => {
                self.visible_indices.clear();
                self.metrics = DashboardMetrics {
                    target,
                    ..Default::default()
                };
            }
        }
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &CellValue) {
        let selected = self.filters.selected_mut(dim);
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values of a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(ds) = &self.dataset {
            *self.filters.selected_mut(dim) = dim.options(ds).clone();
            self.refilter();
        }
    }

    /// Deselect all values of a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.filters.selected_mut(dim).clear();
        self.refilter();
    }
}
