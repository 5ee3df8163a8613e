//! Invoice tax and revenue figures

use crate::constants::INVOICE_TAX_RATE;
use records_dal::{Billing, BillingStatus};
use serde::Serialize;
use utoipa::ToSchema;

/// Line totals for one invoice
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceBreakdown {
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub grand_total: f64,
}

/// Applies the tax rate on top of a subtotal, then takes the discount off
pub fn invoice_breakdown(subtotal: f64, discount: f64) -> InvoiceBreakdown {
    let tax = subtotal * INVOICE_TAX_RATE;
    InvoiceBreakdown {
        subtotal,
        tax,
        discount,
        grand_total: subtotal + tax - discount,
    }
}

/// Sum of paid invoice amounts; pending invoices contribute nothing
pub fn paid_revenue(billings: &[Billing]) -> f64 {
    billings
        .iter()
        .filter(|b| b.status == BillingStatus::Paid)
        .map(|b| b.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn billing(amount: f64, status: BillingStatus) -> Billing {
        Billing {
            id: "b1".into(),
            patient_id: "p1".into(),
            admission_id: None,
            invoice_number: "INV-2026-1234".into(),
            amount,
            items: None,
            status,
            paid_at: None,
            created_by_id: "u1".into(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn breakdown_applies_the_tax_rate() {
        let breakdown = invoice_breakdown(1000.0, 0.0);
        assert_eq!(breakdown.tax, 180.0);
        assert_eq!(breakdown.grand_total, 1180.0);
    }

    #[test]
    fn discount_comes_off_after_tax() {
        let breakdown = invoice_breakdown(2000.0, 500.0);
        assert_eq!(breakdown.tax, 360.0);
        assert_eq!(breakdown.grand_total, 1860.0);
    }

    #[test]
    fn revenue_counts_only_paid_invoices() {
        let billings = vec![
            billing(1000.0, BillingStatus::Paid),
            billing(400.0, BillingStatus::Pending),
            billing(600.0, BillingStatus::Paid),
        ];
        assert_eq!(paid_revenue(&billings), 1600.0);
    }
}
