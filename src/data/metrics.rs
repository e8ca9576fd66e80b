use std::collections::{BTreeMap, BTreeSet};

use super::filter::FilteredView;
use super::model::CellValue;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Distinct movement ids per (week, unit) group, ordered by week then unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementCounts {
    groups: BTreeMap<(CellValue, CellValue), usize>,
}

impl MovementCounts {
    pub fn get(&self, week: &CellValue, unit: &CellValue) -> Option<usize> {
        self.groups.get(&(week.clone(), unit.clone())).copied()
    }

    /// Sorted distinct weeks across all groups (the chart's x axis).
    pub fn weeks(&self) -> Vec<&CellValue> {
        let weeks: BTreeSet<&CellValue> = self.groups.keys().map(|(w, _)| w).collect();
        weeks.into_iter().collect()
    }

    /// One series per unit: `(week, count)` points in week order.
    pub fn series(&self) -> BTreeMap<&CellValue, Vec<(&CellValue, usize)>> {
        let mut series: BTreeMap<&CellValue, Vec<(&CellValue, usize)>> = BTreeMap::new();
        for ((week, unit), n) in &self.groups {
            series.entry(unit).or_default().push((week, *n));
        }
        series
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Billed / unbilled split.
///
/// Rows with a negative bill amount land in none of the three totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BillingStatus {
    pub freight_billed: f64,
    pub non_freight_billed: f64,
    pub unbilled: f64,
}

/// Summed actual weight per load type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tonnage {
    by_load_type: BTreeMap<CellValue, f64>,
}

impl Tonnage {
    pub fn get(&self, load_type: &CellValue) -> Option<f64> {
        self.by_load_type.get(load_type).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellValue, f64)> {
        self.by_load_type.iter().map(|(k, v)| (k, *v))
    }

    pub fn load_types(&self) -> BTreeSet<CellValue> {
        self.by_load_type.keys().cloned().collect()
    }

    pub fn total(&self) -> f64 {
        self.by_load_type.values().sum()
    }

    /// Fraction of the total carried by `load_type`; `0` when there is no weight.
    pub fn share(&self, load_type: &CellValue) -> f64 {
        let total = self.total();
        if total == 0.0 {
            return 0.0;
        }
        self.get(load_type).unwrap_or(0.0) / total
    }

    pub fn len(&self) -> usize {
        self.by_load_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_load_type.is_empty()
    }
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardMetrics {
    pub target: f64,
    pub achieved: f64,
    pub achievement_pct: f64,
    pub movements: MovementCounts,
    pub billing: BillingStatus,
    pub tonnage: Tonnage,
}

// ---------------------------------------------------------------------------
// Computations
// ---------------------------------------------------------------------------

/// Run all five computations over `view`.
pub fn compute(view: &FilteredView<'_>, target: f64) -> DashboardMetrics {
    let achieved = achieved_revenue(view);
    DashboardMetrics {
        target,
        achieved,
        achievement_pct: achievement_pct(achieved, target),
        movements: movement_counts(view),
        billing: billing_status(view),
        tonnage: load_type_tonnage(view),
    }
}

/// Sum of `Bill Amount`.
pub fn achieved_revenue(view: &FilteredView<'_>) -> f64 {
    view.records().map(|r| r.bill_amount).sum()
}

/// `achieved / target * 100`, or `0` for a zero target.
pub fn achievement_pct(achieved: f64, target: f64) -> f64 {
    if target == 0.0 {
        0.0
    } else {
        achieved / target * 100.0
    }
}

/// Distinct `VNO` per (`Week`, `Branch`).
///
/// Rows with a null week or branch are not grouped, and null ids are not counted.
pub fn movement_counts(view: &FilteredView<'_>) -> MovementCounts {
    let mut ids: BTreeMap<(&CellValue, &CellValue), BTreeSet<&CellValue>> = BTreeMap::new();
    for rec in view.records() {
        if rec.week.is_null() || rec.unit.is_null() {
            continue;
        }
        let group = ids.entry((&rec.week, &rec.unit)).or_default();
        if !rec.movement_id.is_null() {
            group.insert(&rec.movement_id);
        }
    }

    MovementCounts {
        groups: ids
            .into_iter()
            .map(|((w, u), set)| ((w.clone(), u.clone()), set.len()))
            .collect(),
    }
}

pub fn billing_status(view: &FilteredView<'_>) -> BillingStatus {
    let mut status = BillingStatus::default();
    for rec in view.records() {
        if rec.bill_amount > 0.0 {
            if rec.is_freight() {
                status.freight_billed += rec.bill_amount;
            } else {
                status.non_freight_billed += rec.bill_amount;
            }
        } else if rec.bill_amount == 0.0 {
            status.unbilled += rec.consignment_freight_amount;
        }
    }
    status
}

/// Sum of `Act. Weight(Main)` per `Load Type`; null load types are dropped.
pub fn load_type_tonnage(view: &FilteredView<'_>) -> Tonnage {
    let mut by_load_type: BTreeMap<CellValue, f64> = BTreeMap::new();
    for rec in view.records() {
        if rec.load_type.is_null() {
            continue;
        }
        *by_load_type.entry(rec.load_type.clone()).or_default() += rec.actual_weight;
    }
    Tonnage { by_load_type }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, init_filter_state, FilterState};
    use crate::data::model::tests::{dataset, row, s};
    use crate::data::model::Dataset;
    use pretty_assertions::assert_eq;

    const TARGET: f64 = 80_000_000.0;

    fn all_rows(ds: &Dataset) -> Vec<usize> {
        filtered_indices(ds, &init_filter_state(ds))
    }

    fn two_row_scenario() -> Dataset {
        dataset(vec![
            row("V1", "Jan", 1, "X", 1_000_000.0, "Freight", 10.0, "Bag", 0.0),
            row("V2", "Jan", 1, "X", 0.0, "Other", 5.0, "Bulk", 200_000.0),
        ])
    }

    #[test]
    fn two_row_scenario_end_to_end() {
        let ds = two_row_scenario();
        let idx = all_rows(&ds);
        let m = compute(&FilteredView::new(&ds, &idx), TARGET);

        assert_eq!(m.target, TARGET);
        assert_eq!(m.achieved, 1_000_000.0);
        assert!((m.achievement_pct - 1.25).abs() < 1e-9);
        assert_eq!(
            m.billing,
            BillingStatus {
                freight_billed: 1_000_000.0,
                non_freight_billed: 0.0,
                unbilled: 200_000.0,
            }
        );
        assert_eq!(m.tonnage.get(&s("Bag")), Some(10.0));
        assert_eq!(m.tonnage.get(&s("Bulk")), Some(5.0));
        assert_eq!(m.tonnage.len(), 2);
        assert_eq!(m.movements.get(&CellValue::Integer(1), &s("X")), Some(2));
        assert_eq!(m.movements.len(), 1);
    }

    #[test]
    fn zero_target_gives_zero_percent() {
        assert_eq!(achievement_pct(1_000_000.0, 0.0), 0.0);
        assert_eq!(achievement_pct(-5.0, 0.0), 0.0);
        assert_eq!(achievement_pct(0.0, 0.0), 0.0);
        assert_eq!(achievement_pct(50.0, 200.0), 25.0);
    }

    #[test]
    fn movements_count_distinct_ids_not_rows() {
        let ds = dataset(vec![
            row("V1", "Jan", 1, "X", 0.0, "", 0.0, "", 0.0),
            row("V1", "Jan", 1, "X", 0.0, "", 0.0, "", 0.0),
            row("V1", "Jan", 1, "X", 0.0, "", 0.0, "", 0.0),
            row("V2", "Jan", 1, "X", 0.0, "", 0.0, "", 0.0),
            row("V1", "Jan", 1, "Y", 0.0, "", 0.0, "", 0.0),
            row("V1", "Jan", 2, "X", 0.0, "", 0.0, "", 0.0),
        ]);
        let idx = all_rows(&ds);
        let counts = movement_counts(&FilteredView::new(&ds, &idx));

        let w1 = CellValue::Integer(1);
        let w2 = CellValue::Integer(2);
        assert_eq!(counts.get(&w1, &s("X")), Some(2));
        assert_eq!(counts.get(&w1, &s("Y")), Some(1));
        assert_eq!(counts.get(&w2, &s("X")), Some(1));
        assert_eq!(counts.weeks(), vec![&w1, &w2]);

        let series = counts.series();
        assert_eq!(series[&s("X")], vec![(&w1, 2), (&w2, 1)]);
        assert_eq!(series[&s("Y")], vec![(&w1, 1)]);
    }

    #[test]
    fn integer_and_float_weeks_group_together() {
        let mut whole = row("V2", "Jan", 0, "X", 0.0, "", 0.0, "", 0.0);
        whole[2] = CellValue::Float(1.0);
        let mut half = row("V3", "Jan", 0, "X", 0.0, "", 0.0, "", 0.0);
        half[2] = CellValue::Float(2.5);
        let ds = dataset(vec![
            row("V1", "Jan", 1, "X", 0.0, "", 0.0, "", 0.0),
            whole,
            row("V4", "Jan", 10, "X", 0.0, "", 0.0, "", 0.0),
            half,
        ]);
        let idx = all_rows(&ds);
        let counts = movement_counts(&FilteredView::new(&ds, &idx));

        let labels: Vec<String> = counts.weeks().iter().map(|w| w.to_string()).collect();
        assert_eq!(labels, vec!["1", "2.5", "10"]);
        assert_eq!(counts.get(&CellValue::Integer(1), &s("X")), Some(2));
        assert_eq!(counts.series()[&s("X")].len(), 3);
    }

    #[test]
    fn null_ids_and_null_group_keys_are_skipped() {
        let mut no_id = row("", "Jan", 1, "X", 0.0, "", 0.0, "", 0.0);
        no_id[0] = CellValue::Null;
        let mut no_week = row("V9", "Jan", 1, "X", 0.0, "", 0.0, "", 0.0);
        no_week[2] = CellValue::Null;
        let ds = dataset(vec![row("V1", "Jan", 1, "X", 0.0, "", 0.0, "", 0.0), no_id, no_week]);
        let idx = all_rows(&ds);
        let counts = movement_counts(&FilteredView::new(&ds, &idx));
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&CellValue::Integer(1), &s("X")), Some(1));
    }

    #[test]
    fn billed_totals_partition_positive_amounts() {
        let ds = dataset(vec![
            row("V1", "Jan", 1, "X", 120.0, "FREIGHT", 0.0, "", 0.0),
            row("V2", "Jan", 1, "X", 30.0, "freight", 0.0, "", 0.0),
            row("V3", "Jan", 1, "X", 45.5, "Detention", 0.0, "", 0.0),
            row("V4", "Jan", 1, "X", 0.0, "Freight", 0.0, "", 70.0),
            row("V5", "Jan", 1, "X", -20.0, "Freight", 0.0, "", 999.0),
        ]);
        let idx = all_rows(&ds);
        let view = FilteredView::new(&ds, &idx);
        let status = billing_status(&view);

        assert_eq!(status.freight_billed, 150.0);
        assert_eq!(status.non_freight_billed, 45.5);
        assert_eq!(status.unbilled, 70.0);

        let positive: f64 = view
            .records()
            .filter(|r| r.bill_amount > 0.0)
            .map(|r| r.bill_amount)
            .sum();
        assert_eq!(status.freight_billed + status.non_freight_billed, positive);
    }

    #[test]
    fn negative_amounts_fall_outside_every_bucket() {
        let ds = dataset(vec![row("V1", "Jan", 1, "X", -10.0, "Other", 0.0, "", 500.0)]);
        let idx = all_rows(&ds);
        let view = FilteredView::new(&ds, &idx);
        assert_eq!(billing_status(&view), BillingStatus::default());
        assert_eq!(achieved_revenue(&view), -10.0);
    }

    #[test]
    fn missing_bill_amount_counts_as_unbilled() {
        let mut r = row("V1", "Jan", 1, "X", 0.0, "Freight", 0.0, "", 250.0);
        r[4] = CellValue::Null;
        let ds = dataset(vec![r]);
        let idx = all_rows(&ds);
        let status = billing_status(&FilteredView::new(&ds, &idx));
        assert_eq!(status.unbilled, 250.0);
        assert_eq!(status.freight_billed, 0.0);
    }

    #[test]
    fn tonnage_sums_per_load_type() {
        let mut untyped = row("V4", "Jan", 1, "X", 0.0, "", 7.0, "", 0.0);
        untyped[7] = CellValue::Null;
        let ds = dataset(vec![
            row("V1", "Jan", 1, "X", 0.0, "", 10.0, "Bag", 0.0),
            row("V2", "Jan", 1, "X", 0.0, "", 2.5, "Bag", 0.0),
            row("V3", "Jan", 1, "X", 0.0, "", 12.5, "Bulk", 0.0),
            untyped,
        ]);
        let idx = all_rows(&ds);
        let tonnage = load_type_tonnage(&FilteredView::new(&ds, &idx));
        assert_eq!(tonnage.get(&s("Bag")), Some(12.5));
        assert_eq!(tonnage.get(&s("Bulk")), Some(12.5));
        assert_eq!(tonnage.total(), 25.0);
        assert_eq!(tonnage.share(&s("Bag")), 0.5);
        assert_eq!(tonnage.share(&s("Loose")), 0.0);
    }

    #[test]
    fn empty_view_yields_zero_metrics() {
        let ds = two_row_scenario();
        let idx = filtered_indices(&ds, &FilterState::default());
        let m = compute(&FilteredView::new(&ds, &idx), TARGET);

        assert_eq!(m.achieved, 0.0);
        assert_eq!(m.achievement_pct, 0.0);
        assert_eq!(m.billing, BillingStatus::default());
        assert!(m.tonnage.is_empty());
        assert!(m.movements.is_empty());
        assert_eq!(m.tonnage.share(&s("Bag")), 0.0);
    }

    #[test]
    fn metrics_follow_the_filter() {
        let ds = dataset(vec![
            row("V1", "Jan", 1, "X", 100.0, "Freight", 1.0, "Bag", 0.0),
            row("V2", "Feb", 5, "X", 300.0, "Freight", 1.0, "Bag", 0.0),
            row("V3", "Jan", 1, "Y", 500.0, "Other", 1.0, "Bulk", 0.0),
        ]);
        let filters = FilterState {
            periods: [s("Jan")].into(),
            units: [s("X"), s("Y")].into(),
        };
        let idx = filtered_indices(&ds, &filters);
        let m = compute(&FilteredView::new(&ds, &idx), 1_200.0);
        assert_eq!(m.achieved, 600.0);
        assert_eq!(m.achievement_pct, 50.0);
        assert_eq!(m.billing.freight_billed, 100.0);
        assert_eq!(m.billing.non_freight_billed, 500.0);
        assert_eq!(m.movements.weeks(), vec![&CellValue::Integer(1)]);
    }
}
