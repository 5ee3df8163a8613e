//! Affiliate commission figures

use crate::constants::COMMISSION_RATE;
use records_dal::{AffiliateTracking, CommissionStatus};
use serde::Serialize;
use utoipa::ToSchema;

/// Commission earned on one onboarded account's plan amount
pub fn commission_for_plan(plan_amount: f64) -> f64 {
    plan_amount * COMMISSION_RATE
}

/// Totals over an affiliate's commission entries
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionSummary {
    pub total: f64,
    pub pending: f64,
    pub paid: f64,
}

/// Sums an affiliate's entries by payout status
pub fn summarize(entries: &[AffiliateTracking]) -> CommissionSummary {
    let mut summary = CommissionSummary {
        total: 0.0,
        pending: 0.0,
        paid: 0.0,
    };
    for entry in entries {
        summary.total += entry.amount;
        match entry.status {
            CommissionStatus::Pending => summary.pending += entry.amount,
            CommissionStatus::Paid => summary.paid += entry.amount,
        }
    }
    summary
}

/// One month's commission total
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: u32,
    pub amount: f64,
}

/// Per-month totals for one calendar year, zero-filled for quiet months
pub fn monthly_rollup(entries: &[AffiliateTracking], year: i32) -> Vec<MonthlyRevenue> {
    let mut months: Vec<MonthlyRevenue> = (1..=12)
        .map(|month| MonthlyRevenue { month, amount: 0.0 })
        .collect();
    for entry in entries
        .iter()
        .filter(|e| e.year == year && (1..=12).contains(&e.month))
    {
        months[entry.month as usize - 1].amount += entry.amount;
    }
    months
}
