//! Business constants. The single source of truth; nothing else in the
//! workspace hard-codes these figures.

/// Affiliate share of an onboarded account's plan amount
pub const COMMISSION_RATE: f64 = 0.20;

/// Tax applied on top of an invoice subtotal
pub const INVOICE_TAX_RATE: f64 = 0.18;

/// Monthly plan amount for an onboarded doctor account, in rupees
pub const DOCTOR_PLAN_AMOUNT: f64 = 3500.0;

/// Monthly plan amount for an onboarded hospital account, in rupees
pub const HOSPITAL_PLAN_AMOUNT: f64 = 6000.0;

/// Days of free trial granted at account registration
pub const TRIAL_PERIOD_DAYS: i64 = 7;
