use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::schema;
use crate::error::{LoadError, SchemaValidationError};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common spreadsheet cell types.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Date / datetime kept as text for display.
    Date(String),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --
//
// `Integer` and `Float` share one numeric rank: `Integer(1)` equals
// `Float(1.0)` and `2.5` sorts between `2` and `10`.

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                String(_) => 3,
                Date(_) => 4,
            }
        }
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            CellValue::String(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            CellValue::Date(s) => {
                4u8.hash(state);
                s.hash(state);
            }
            // Equal numbers have identical f64 bits under `total_cmp`.
            CellValue::Integer(i) => {
                2u8.hash(state);
                (*i as f64).to_bits().hash(state);
            }
            CellValue::Float(f) => {
                2u8.hash(state);
                f.to_bits().hash(state);
            }
            CellValue::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            CellValue::Null => 0u8.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Spreadsheets store week numbers etc. as floats; show `3`, not `3.0`.
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Apply the missing-as-zero rule to a numeric cell.
    ///
    /// * `Null`, empty text and `NaN` → `Some(0.0)`
    /// * numbers and numeric text → the number
    /// * anything else → `None`
    pub fn to_amount(&self) -> Option<f64> {
        match self {
            CellValue::Null => Some(0.0),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) if v.is_nan() => Some(0.0),
            CellValue::Float(v) => Some(*v),
            CellValue::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Some(0.0);
                }
                s.parse::<f64>()
                    .ok()
                    .map(|v| if v.is_nan() { 0.0 } else { v })
            }
            CellValue::Bool(_) | CellValue::Date(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the raw loaded sheet
// ---------------------------------------------------------------------------

/// The raw tabular source: normalised header plus every cell, row-major.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names, trimmed of surrounding whitespace.
    pub columns: Vec<String>,
    /// Rows, each padded or truncated to `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, trimming header names and squaring up ragged rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Table { columns, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Required columns absent from the header, in required order.
    pub fn missing_columns(&self) -> Vec<String> {
        schema::REQUIRED
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Record – one consignment / billing line
// ---------------------------------------------------------------------------

/// Typed view of the nine required columns of one row.
/// Numeric fields have already gone through [`CellValue::to_amount`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub movement_id: CellValue,
    pub period: CellValue,
    pub week: CellValue,
    pub unit: CellValue,
    pub bill_amount: f64,
    pub bill_type: CellValue,
    pub actual_weight: f64,
    pub load_type: CellValue,
    pub consignment_freight_amount: f64,
}

impl Record {
    /// Case-insensitive match of the bill type against `"freight"`.
    /// A null bill type is never freight.
    pub fn is_freight(&self) -> bool {
        match &self.bill_type {
            CellValue::Null => false,
            other => other.to_string().to_lowercase() == schema::FREIGHT_BILL_TYPE,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the validated, loaded source
// ---------------------------------------------------------------------------

/// A validated table plus its typed records and filter option indices.
/// Read-only after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// The raw table, kept verbatim for the data preview.
    pub table: Table,
    /// One record per table row, same order.
    pub records: Vec<Record>,
    /// Sorted distinct `Month` values.
    pub periods: BTreeSet<CellValue>,
    /// Sorted distinct `Branch` values.
    pub units: BTreeSet<CellValue>,
}

struct RequiredIndices {
    movement_id: usize,
    period: usize,
    week: usize,
    unit: usize,
    bill_amount: usize,
    bill_type: usize,
    actual_weight: usize,
    load_type: usize,
    consignment_freight_amount: usize,
}

impl Dataset {
    /// Validate the schema and extract typed records.
    pub fn from_table(table: Table) -> Result<Self, LoadError> {
        let missing = table.missing_columns();
        if !missing.is_empty() {
            return Err(SchemaValidationError { missing }.into());
        }

        // All present, checked above.
        let idx = |name: &str| table.column_index(name).unwrap_or_default();
        let cols = RequiredIndices {
            movement_id: idx(schema::VNO),
            period: idx(schema::MONTH),
            week: idx(schema::WEEK),
            unit: idx(schema::BRANCH),
            bill_amount: idx(schema::BILL_AMOUNT),
            bill_type: idx(schema::BILL_TYPE),
            actual_weight: idx(schema::ACTUAL_WEIGHT),
            load_type: idx(schema::LOAD_TYPE),
            consignment_freight_amount: idx(schema::CONSIGNMENT_FREIGHT_AMOUNT),
        };

        let mut records = Vec::with_capacity(table.len());
        let mut periods = BTreeSet::new();
        let mut units = BTreeSet::new();

        for (row_no, row) in table.rows.iter().enumerate() {
            let amount = |col: usize| -> Result<f64, LoadError> {
                row[col].to_amount().ok_or_else(|| LoadError::InvalidNumber {
                    // 1-based, counting the header line.
                    row: row_no + 2,
                    column: table.columns[col].clone(),
                    value: row[col].to_string(),
                })
            };

            let record = Record {
                movement_id: row[cols.movement_id].clone(),
                period: row[cols.period].clone(),
                week: row[cols.week].clone(),
                unit: row[cols.unit].clone(),
                bill_amount: amount(cols.bill_amount)?,
                bill_type: row[cols.bill_type].clone(),
                actual_weight: amount(cols.actual_weight)?,
                load_type: row[cols.load_type].clone(),
                consignment_freight_amount: amount(cols.consignment_freight_amount)?,
            };

            periods.insert(record.period.clone());
            units.insert(record.unit.clone());
            records.push(record);
        }

        Ok(Dataset {
            table,
            records,
            periods,
            units,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
