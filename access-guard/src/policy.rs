//! The static allow-list table
//!
//! Every (resource, operation) pair has exactly one row. Changing who may
//! touch what happens here and nowhere else.

use records_dal::{Resource, Role};

/// DAL operation class a role may be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Write,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

const CLINICAL: &[Role] = &[Role::Doctor, Role::Nurse, Role::Staff];
const STOCK_KEEPERS: &[Role] = &[Role::Nurse, Role::Staff];
const AFFILIATE_ONLY: &[Role] = &[Role::Affiliate];
const NURSE_ONLY: &[Role] = &[Role::Nurse];
const DOCTOR_ONLY: &[Role] = &[Role::Doctor];
const PROFILE_READERS: &[Role] = &[Role::Doctor, Role::Nurse, Role::Staff, Role::Affiliate];

/// One row per (resource, operation) pair
const POLICY: &[(Resource, Operation, &[Role])] = &[
    (Resource::Users, Operation::Read, PROFILE_READERS),
    (Resource::Users, Operation::Write, DOCTOR_ONLY),
    (Resource::Patients, Operation::Read, CLINICAL),
    (Resource::Patients, Operation::Write, CLINICAL),
    (Resource::Admissions, Operation::Read, CLINICAL),
    (Resource::Admissions, Operation::Write, CLINICAL),
    (Resource::TreatmentLogs, Operation::Read, CLINICAL),
    (Resource::TreatmentLogs, Operation::Write, CLINICAL),
    (Resource::Billings, Operation::Read, CLINICAL),
    (Resource::Billings, Operation::Write, CLINICAL),
    (Resource::InventoryItems, Operation::Read, STOCK_KEEPERS),
    (Resource::InventoryItems, Operation::Write, STOCK_KEEPERS),
    (Resource::DietPlans, Operation::Read, NURSE_ONLY),
    (Resource::DietPlans, Operation::Write, NURSE_ONLY),
    (Resource::AffiliateTracking, Operation::Read, AFFILIATE_ONLY),
    (Resource::AffiliateTracking, Operation::Write, AFFILIATE_ONLY),
    (Resource::ActivityLogs, Operation::Read, CLINICAL),
    (Resource::ActivityLogs, Operation::Write, CLINICAL),
    (Resource::Accounts, Operation::Read, AFFILIATE_ONLY),
    (Resource::Accounts, Operation::Write, AFFILIATE_ONLY),
];

/// Roles allowed for the (resource, operation) pair.
///
/// An absent row denies everyone; the table is expected to stay total.
pub fn allowed_roles(resource: Resource, operation: Operation) -> &'static [Role] {
    POLICY
        .iter()
        .find(|(r, o, _)| *r == resource && *o == operation)
        .map_or(&[], |(_, _, roles)| *roles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_RESOURCES: &[Resource] = &[
        Resource::Users,
        Resource::Patients,
        Resource::Admissions,
        Resource::TreatmentLogs,
        Resource::Billings,
        Resource::InventoryItems,
        Resource::DietPlans,
        Resource::AffiliateTracking,
        Resource::ActivityLogs,
        Resource::Accounts,
    ];

    #[test]
    fn table_has_exactly_one_row_per_pair() {
        for resource in ALL_RESOURCES {
            for operation in [Operation::Read, Operation::Write] {
                let rows = POLICY
                    .iter()
                    .filter(|(r, o, _)| r == resource && *o == operation)
                    .count();
                assert_eq!(rows, 1, "{resource} {operation} must have one row");
            }
        }
    }

    #[test]
    fn affiliate_modules_are_affiliate_only() {
        for resource in [Resource::AffiliateTracking, Resource::Accounts] {
            for operation in [Operation::Read, Operation::Write] {
                assert_eq!(allowed_roles(resource, operation), &[Role::Affiliate]);
            }
        }
    }

    #[test]
    fn only_doctors_write_staff_profiles() {
        assert_eq!(allowed_roles(Resource::Users, Operation::Write), &[Role::Doctor]);
        assert!(allowed_roles(Resource::Users, Operation::Read).contains(&Role::Affiliate));
    }

    #[test]
    fn diet_plans_are_nurse_territory() {
        assert_eq!(allowed_roles(Resource::DietPlans, Operation::Write), &[Role::Nurse]);
        assert!(!allowed_roles(Resource::DietPlans, Operation::Read).contains(&Role::Doctor));
    }

    #[test]
    fn inventory_is_shared_between_nurse_and_staff() {
        let roles = allowed_roles(Resource::InventoryItems, Operation::Write);
        assert!(roles.contains(&Role::Nurse));
        assert!(roles.contains(&Role::Staff));
        assert!(!roles.contains(&Role::Doctor));
    }

    #[test]
    fn hospital_role_never_reaches_clinical_records() {
        for resource in ALL_RESOURCES {
            for operation in [Operation::Read, Operation::Write] {
                assert!(!allowed_roles(*resource, operation).contains(&Role::Hospital));
            }
        }
    }
}
