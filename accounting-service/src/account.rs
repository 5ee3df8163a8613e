//! Subscription plan pricing and account standing

use crate::constants::{DOCTOR_PLAN_AMOUNT, HOSPITAL_PLAN_AMOUNT, TRIAL_PERIOD_DAYS};
use crate::error::{AccountingError, AccountingResult};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use records_dal::{Account, AccountStatus, NewAccount, PartnerType};

/// Monthly plan amount for the chosen partner type
pub fn plan_amount(plan_type: PartnerType) -> f64 {
    match plan_type {
        PartnerType::Doctor => DOCTOR_PLAN_AMOUNT,
        PartnerType::Hospital => HOSPITAL_PLAN_AMOUNT,
    }
}

/// Trial window opening at `now`: (planStart, planEnd) as stored timestamps
pub fn trial_window(now: DateTime<Utc>) -> (String, String) {
    let end = now + Duration::days(TRIAL_PERIOD_DAYS);
    (stamp(now), stamp(end))
}

fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Assembles the registration draft for an onboarded account.
///
/// Plan amount follows the chosen plan, the trial window opens at `now`,
/// and the account starts in `trial` standing with no payment on record.
pub fn registration(
    name: impl Into<String>,
    email: impl Into<String>,
    contact: impl Into<String>,
    plan_type: PartnerType,
    affiliate_id: Option<String>,
    now: DateTime<Utc>,
) -> NewAccount {
    let (plan_start, plan_end) = trial_window(now);
    NewAccount {
        name: name.into(),
        email: email.into(),
        contact: contact.into(),
        plan_type,
        plan_amount: plan_amount(plan_type),
        plan_start,
        plan_end,
        account_type: plan_type.to_string(),
        status: AccountStatus::Trial,
        last_payment: None,
        affiliate_id,
    }
}

/// Standing derived from the stored plan window and payment history.
///
/// A payment on record makes the account active; otherwise it stays in
/// trial until `planEnd` passes, then counts as expired.
pub fn standing(account: &Account, now: DateTime<Utc>) -> AccountingResult<AccountStatus> {
    if account.last_payment.is_some() {
        return Ok(AccountStatus::Active);
    }
    let plan_end = DateTime::parse_from_rfc3339(&account.plan_end)
        .map_err(|e| AccountingError::InvalidTimestamp(format!("{}: {e}", account.plan_end)))?;
    if now > plan_end.with_timezone(&Utc) {
        Ok(AccountStatus::Expired)
    } else {
        Ok(AccountStatus::Trial)
    }
}
