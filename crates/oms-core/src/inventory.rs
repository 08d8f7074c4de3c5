//! Finished-stock and per-batch production summaries.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Expense, ShortingEntry, StitchingChallan, WeaverChallan};

/// Stock position of one fabric quality.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FinishedStock {
    pub quality_name: String,
    pub total_qty: f64,
    pub shorted_qty: f64,
    pub issued_qty: f64,
    pub available_qty: f64,
}

/// Aggregate stock per quality, sorted by quality name.
///
/// `total_qty` accumulates the `rate` of every named, non-zero
/// `quality_details` entry; `shorted_qty` the shorting entries; `issued_qty`
/// the stitching challan quantities. A quality appearing in any of the three
/// sources gets a row.
#[must_use]
pub fn finished_stock(
    weaver_challans: &[WeaverChallan],
    shorting_entries: &[ShortingEntry],
    stitching_challans: &[StitchingChallan],
) -> Vec<FinishedStock> {
    let mut totals: BTreeMap<&str, [f64; 3]> = BTreeMap::new();

    for detail in weaver_challans.iter().flat_map(|c| &c.quality_details) {
        match (detail.quality_name.as_deref(), detail.rate) {
            (Some(name), Some(rate)) if !name.is_empty() && rate != 0.0 => {
                totals.entry(name).or_default()[0] += rate;
            }
            _ => {}
        }
    }
    for entry in shorting_entries {
        if let Some(name) = entry.quality_name.as_deref().filter(|n| !n.is_empty()) {
            totals.entry(name).or_default()[1] += entry.shorting_qty;
        }
    }
    for challan in stitching_challans.iter().filter(|c| !c.quality.is_empty()) {
        #[allow(clippy::cast_precision_loss)]
        let issued = challan.quantity as f64;
        totals.entry(&challan.quality).or_default()[2] += issued;
    }

    totals
        .into_iter()
        .map(|(quality, [total, shorted, issued])| FinishedStock {
            quality_name: quality.to_string(),
            total_qty: total,
            shorted_qty: shorted,
            issued_qty: issued,
            available_qty: total - shorted - issued,
        })
        .collect()
}

/// Stitching challan as listed under a batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BatchStitching {
    pub id: i64,
    pub date: NaiveDate,
    pub challan_no: String,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub top_qty: Option<i64>,
    pub bottom_qty: Option<i64>,
    pub inventory_classification: Option<String>,
}

/// Expense as listed under a batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BatchExpense {
    pub id: i64,
    pub expense_date: NaiveDate,
    pub cost: f64,
    pub expense_for: Vec<String>,
}

/// Everything produced from one weaver challan's batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BatchData {
    pub batch_number: String,
    pub weaver_challan_date: NaiveDate,
    pub weaver_challan_party: String,
    pub weaver_challan_quantity: f64,
    pub total_raw_fabric_used: f64,
    pub stitching_challans: Vec<BatchStitching>,
    pub expenses: Vec<BatchExpense>,
}

/// One entry per weaver challan, in input order, with the stitching challans
/// whose batch list contains its batch number and those challans' expenses.
#[must_use]
pub fn batch_data(
    weaver_challans: &[WeaverChallan],
    stitching_challans: &[StitchingChallan],
    expenses: &[Expense],
) -> Vec<BatchData> {
    weaver_challans
        .iter()
        .map(|weaver| {
            let stitched: Vec<&StitchingChallan> = stitching_challans
                .iter()
                .filter(|s| s.batch_number.contains(&weaver.batch_number))
                .collect();
            let challan_nos: BTreeSet<&str> =
                stitched.iter().map(|s| s.challan_no.as_str()).collect();
            let batch_expenses = expenses
                .iter()
                .filter(|e| {
                    e.challan_no
                        .as_deref()
                        .is_some_and(|no| challan_nos.contains(no))
                })
                .map(|e| BatchExpense {
                    id: e.id,
                    expense_date: e.expense_date,
                    cost: e.cost,
                    expense_for: e.expense_for.clone(),
                })
                .collect();

            BatchData {
                batch_number: weaver.batch_number.clone(),
                weaver_challan_date: weaver.challan_date,
                weaver_challan_party: weaver.ms_party_name.clone(),
                weaver_challan_quantity: weaver.total_grey_mtr,
                total_raw_fabric_used: weaver.total_grey_mtr,
                stitching_challans: stitched
                    .into_iter()
                    .map(|s| BatchStitching {
                        id: s.id,
                        date: s.date,
                        challan_no: s.challan_no.clone(),
                        product_name: s.product_name.clone(),
                        quantity: s.quantity,
                        top_qty: s.top_qty,
                        bottom_qty: s.bottom_qty,
                        inventory_classification: s
                            .inventory_classification
                            .map(|c| c.as_str().to_string()),
                    })
                    .collect(),
                expenses: batch_expenses,
            }
        })
        .collect()
}

/// Distinct non-empty batch numbers across weaver challans, in first-seen order.
#[must_use]
pub fn batch_numbers(weaver_challans: &[WeaverChallan]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    weaver_challans
        .iter()
        .map(|c| c.batch_number.as_str())
        .filter(|b| !b.is_empty() && seen.insert(*b))
        .map(str::to_string)
        .collect()
}

/// Distinct non-empty quality names across weaver challans, sorted.
#[must_use]
pub fn distinct_qualities(weaver_challans: &[WeaverChallan]) -> Vec<String> {
    weaver_challans
        .iter()
        .flat_map(|c| &c.quality_details)
        .filter_map(|q| q.quality_name.as_deref())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
