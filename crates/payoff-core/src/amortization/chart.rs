//! Down-sampled balance curves for the payoff chart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::scenario::ScenarioResult;
use crate::types::Money;

/// Default number of points drawn per curve.
pub const DEFAULT_CHART_POINTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub index: usize,
    /// Baseline payment number this point samples.
    pub payment_number: u32,
    /// Year mark (e.g. "5y") on every fifth year, empty otherwise.
    pub label: String,
    pub baseline_balance: Money,
    /// Zero once the accelerated schedule has paid off.
    pub accelerated_balance: Money,
}

/// Sample both schedules at the same payment numbers.
pub fn balance_chart(result: &ScenarioResult, max_points: usize) -> Vec<ChartPoint> {
    let baseline = &result.baseline_schedule;
    if baseline.is_empty() {
        return Vec::new();
    }

    let interval = (baseline.len() / max_points.max(1)).max(1);
    let last = baseline.len() - 1;

    let mut indices: Vec<usize> = (0..baseline.len()).step_by(interval).collect();
    if indices.last() != Some(&last) {
        indices.push(last);
    }

    indices
        .into_iter()
        .enumerate()
        .map(|(i, idx)| {
            let record = &baseline[idx];
            // Both schedules number payments from 1 without gaps.
            let accelerated_balance = result
                .accelerated_schedule
                .get(idx)
                .map(|p| p.remaining_balance)
                .unwrap_or(Decimal::ZERO);
            let year_mark = idx / 12;
            ChartPoint {
                index: i,
                payment_number: record.payment_number,
                label: if year_mark % 5 == 0 {
                    format!("{year_mark}y")
                } else {
                    String::new()
                },
                baseline_balance: record.remaining_balance,
                accelerated_balance,
            }
        })
        .collect()
}
