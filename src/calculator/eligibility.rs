//! Eligibility comparison behind the "for me" button and calculator mode.
//!
//! A university requirement that is NULL constrains nothing. A requirement
//! the user has no stat for counts against them and is reported as missing,
//! so the front end can prompt for the value instead of claiming a fit.

use serde::Serialize;

use crate::account::models::Profile;
use crate::university::models::University;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionOutcome {
    Met,
    NotMet,
    Missing,
    NotRequired,
}

impl CriterionOutcome {
    pub fn satisfied(&self) -> bool {
        matches!(self, CriterionOutcome::Met | CriterionOutcome::NotRequired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EligibilityCheck {
    pub gpa: CriterionOutcome,
    pub ielts: CriterionOutcome,
    pub ent: CriterionOutcome,
    pub eligible: bool,
}

fn check<T: PartialOrd>(required: Option<&T>, actual: Option<&T>) -> CriterionOutcome {
    match (required, actual) {
        (None, _) => CriterionOutcome::NotRequired,
        (Some(_), None) => CriterionOutcome::Missing,
        (Some(required), Some(actual)) if actual >= required => CriterionOutcome::Met,
        _ => CriterionOutcome::NotMet,
    }
}

pub fn classify(profile: &Profile, university: &University) -> EligibilityCheck {
    let gpa = check(university.gpa_required.as_ref(), profile.my_gpa.as_ref());
    let ielts = check(university.ielts_required.as_ref(), profile.my_ielts.as_ref());
    let ent = check(university.ent_required.as_ref(), profile.my_ent.as_ref());

    EligibilityCheck {
        gpa,
        ielts,
        ent,
        eligible: gpa.satisfied() && ielts.satisfied() && ent.satisfied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn decimal(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn no_requirement_constrains_nothing() {
        assert_eq!(check::<i32>(None, None), CriterionOutcome::NotRequired);
        assert_eq!(check(None, Some(&120)), CriterionOutcome::NotRequired);
    }

    #[test]
    fn missing_stat_against_requirement() {
        assert_eq!(check(Some(&100), None), CriterionOutcome::Missing);
        assert!(!CriterionOutcome::Missing.satisfied());
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(check(Some(&100), Some(&100)), CriterionOutcome::Met);
        assert_eq!(check(Some(&100), Some(&99)), CriterionOutcome::NotMet);
        assert_eq!(
            check(Some(&decimal("6.5")), Some(&decimal("6.5"))),
            CriterionOutcome::Met
        );
        assert_eq!(
            check(Some(&decimal("6.5")), Some(&decimal("6.0"))),
            CriterionOutcome::NotMet
        );
    }

    #[test]
    fn eligible_only_when_every_criterion_is_satisfied() {
        let met = CriterionOutcome::Met;
        let not_required = CriterionOutcome::NotRequired;
        assert!(met.satisfied() && not_required.satisfied());
        assert!(!CriterionOutcome::NotMet.satisfied());
    }
}
