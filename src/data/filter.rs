use std::collections::BTreeSet;

use super::model::{CellValue, Dataset, Record};
use super::schema;

// ---------------------------------------------------------------------------
// Filter predicate: which period / unit labels are selected
// ---------------------------------------------------------------------------

/// The two filterable dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Period,
    Unit,
}

impl Dimension {
    pub const ALL: [Dimension; 2] = [Dimension::Period, Dimension::Unit];

    /// Source column name, also used as the filter heading.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Period => schema::MONTH,
            Dimension::Unit => schema::BRANCH,
        }
    }

    /// Sorted distinct values offered for selection.
    pub fn options(self, dataset: &Dataset) -> &BTreeSet<CellValue> {
        match self {
            Dimension::Period => &dataset.periods,
            Dimension::Unit => &dataset.units,
        }
    }
}

/// Selected values per dimension.
///
/// Unlike a "no filter" default, an empty set selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub periods: BTreeSet<CellValue>,
    pub units: BTreeSet<CellValue>,
}

impl FilterState {
    pub fn selected(&self, dim: Dimension) -> &BTreeSet<CellValue> {
        match dim {
            Dimension::Period => &self.periods,
            Dimension::Unit => &self.units,
        }
    }

    pub fn selected_mut(&mut self, dim: Dimension) -> &mut BTreeSet<CellValue> {
        match dim {
            Dimension::Period => &mut self.periods,
            Dimension::Unit => &mut self.units,
        }
    }

    /// A row passes when both its period and its unit are selected.
    pub fn accepts(&self, record: &Record) -> bool {
        self.periods.contains(&record.period) && self.units.contains(&record.unit)
    }
}

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(dataset: &Dataset) -> FilterState {
    FilterState {
        periods: dataset.periods.clone(),
        units: dataset.units.clone(),
    }
}

/// Return indices of rows that pass the filter, in source order.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filters.accepts(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – borrowed subset of the dataset
// ---------------------------------------------------------------------------

/// Rows of a [`Dataset`] selected by index. Never owns or mutates the rows.
#[derive(Debug, Clone, Copy)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: &'a [usize],
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a Dataset, indices: &'a [usize]) -> Self {
        Self { dataset, indices }
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + 'a {
        let (dataset, indices) = (self.dataset, self.indices);
        indices.iter().map(move |&i| &dataset.records[i])
    }

    /// The `n`-th visible raw row (every column, including pass-through ones).
    pub fn row(&self, n: usize) -> Option<&'a [CellValue]> {
        let dataset = self.dataset;
        self.indices
            .get(n)
            .map(|&i| dataset.table.rows[i].as_slice())
    }

    pub fn columns(&self) -> &'a [String] {
        &self.dataset.table.columns
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
