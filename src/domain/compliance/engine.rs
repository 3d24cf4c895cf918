//! Carry-on compliance rule engine
//!
//! Pure and deterministic: no I/O, no shared state, no randomness. Safe to
//! call from any number of tasks at once.

use tracing::debug;

use super::model::{FeeBreakdown, LimitProfile, Measurement, Verdict, Violation, ViolationCode};
use crate::domain::i18n::Language;
use crate::support::errors::EngineError;

/// Evaluate one measured bag against a limit profile.
///
/// Tolerance widens the single-axis checks only; the linear sum and the
/// weight are compared against their raw limits. A value equal to its
/// (tolerance-adjusted) limit is compliant.
///
/// Messages are rendered in English; see [`Verdict::localized`].
pub fn evaluate(
    measurement: &Measurement,
    profile: &LimitProfile,
    compute_fees: bool,
) -> Result<Verdict, EngineError> {
    measurement.validate()?;
    profile.validate()?;

    let tol = profile.tolerance_cm;
    let checks = [
        (
            ViolationCode::Width,
            excess(measurement.width_cm, profile.max_width_cm + tol),
        ),
        (
            ViolationCode::Length,
            excess(measurement.length_cm, profile.max_length_cm + tol),
        ),
        (
            ViolationCode::Height,
            excess(measurement.height_cm, profile.max_height_cm + tol),
        ),
        (
            ViolationCode::LinearSum,
            excess(measurement.linear_sum(), profile.max_linear_cm),
        ),
        (
            ViolationCode::Weight,
            excess(measurement.weight_kg, profile.max_weight_kg),
        ),
    ];

    let violations: Vec<Violation> = checks
        .into_iter()
        .filter(|(_, amount)| *amount > 0.0)
        .map(|(code, amount)| Violation::new(code, amount, Language::En))
        .collect();

    let compliant = violations.is_empty();
    let fees = if compute_fees && !compliant {
        Some(fee_breakdown(&violations, profile))
    } else {
        None
    };

    debug!(
        compliant,
        violations = violations.len(),
        total = fees.as_ref().map(|f| f.total),
        "Bag evaluated"
    );

    Ok(Verdict {
        compliant,
        violations,
        fees,
    })
}

fn excess(value: f64, limit: f64) -> f64 {
    if value > limit {
        value - limit
    } else {
        0.0
    }
}

fn fee_breakdown(violations: &[Violation], profile: &LimitProfile) -> FeeBreakdown {
    let oversize_fee = if violations.iter().any(|v| v.code.is_oversize()) {
        profile.oversize_fee_flat
    } else {
        0.0
    };
    let weight_excess = violations
        .iter()
        .find(|v| v.code == ViolationCode::Weight)
        .map(|v| v.excess)
        .unwrap_or(0.0);
    let overweight_fee = profile.overweight_fee_per_kg * weight_excess;

    FeeBreakdown {
        oversize_fee,
        overweight_fee,
        total: oversize_fee + overweight_fee,
        currency: profile.currency.clone(),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn jetsmart_cabin() -> LimitProfile {
        LimitProfile {
            max_width_cm: 35.0,
            max_length_cm: 55.0,
            max_height_cm: 25.0,
            max_linear_cm: 115.0,
            max_weight_kg: 10.0,
            tolerance_cm: 1.0,
            overweight_fee_per_kg: 15.0,
            oversize_fee_flat: 30.0,
            currency: "USD".into(),
        }
    }

    fn bag(width: f64, length: f64, height: f64, weight: f64) -> Measurement {
        Measurement::new(width, length, height, weight)
    }

    #[test]
    fn compliant_bag_has_no_violations_and_no_fees() {
        let v = evaluate(&bag(30.0, 50.0, 20.0, 8.0), &jetsmart_cabin(), true).unwrap();
        assert!(v.compliant);
        assert!(v.violations.is_empty());
        assert!(v.fees.is_none());
    }

    #[test]
    fn wide_bag_pays_flat_oversize_fee() {
        let v = evaluate(&bag(40.0, 50.0, 20.0, 8.0), &jetsmart_cabin(), true).unwrap();
        assert!(!v.compliant);
        assert_eq!(v.codes(), vec![ViolationCode::Width]);
        assert_eq!(v.violations[0].excess, 4.0);
        assert_eq!(v.violations[0].message, "Width exceeds limit by 4.0 cm");

        let fees = v.fees.unwrap();
        assert_eq!(fees.oversize_fee, 30.0);
        assert_eq!(fees.overweight_fee, 0.0);
        assert_eq!(fees.total, 30.0);
        assert_eq!(fees.currency, "USD");
    }

    #[test]
    fn heavy_bag_pays_per_kilogram() {
        let v = evaluate(&bag(30.0, 50.0, 20.0, 13.0), &jetsmart_cabin(), true).unwrap();
        assert_eq!(v.codes(), vec![ViolationCode::Weight]);
        assert_eq!(v.violations[0].excess, 3.0);

        let fees = v.fees.unwrap();
        assert_eq!(fees.overweight_fee, 45.0);
        assert_eq!(fees.oversize_fee, 0.0);
        assert_eq!(fees.total, 45.0);
    }

    #[test]
    fn width_on_tolerance_boundary_is_compliant() {
        let v = evaluate(&bag(36.0, 50.0, 20.0, 8.0), &jetsmart_cabin(), true).unwrap();
        assert!(v.compliant);
        assert!(v.fees.is_none());
    }

    #[test]
    fn one_unit_past_boundary_is_one_width_violation() {
        let v = evaluate(&bag(37.0, 50.0, 20.0, 8.0), &jetsmart_cabin(), false).unwrap();
        assert_eq!(v.codes(), vec![ViolationCode::Width]);
        assert_eq!(v.violations[0].excess, 1.0);
    }

    #[test]
    fn negative_width_is_invalid_input() {
        let err = evaluate(&bag(-1.0, 50.0, 20.0, 8.0), &jetsmart_cabin(), true).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidInput {
                field: "width_cm",
                reason: "must not be negative"
            }
        );
    }

    #[test]
    fn non_finite_values_are_invalid_input() {
        let err = evaluate(&bag(30.0, f64::NAN, 20.0, 8.0), &jetsmart_cabin(), true).unwrap_err();
        assert_eq!(err.field(), "length_cm");

        let mut profile = jetsmart_cabin();
        profile.max_weight_kg = f64::INFINITY;
        let err = evaluate(&bag(30.0, 50.0, 20.0, 8.0), &profile, true).unwrap_err();
        assert_eq!(err.field(), "max_weight_kg");
    }

    #[test]
    fn negative_profile_field_is_invalid_input() {
        let mut profile = jetsmart_cabin();
        profile.tolerance_cm = -0.5;
        let err = evaluate(&bag(30.0, 50.0, 20.0, 8.0), &profile, true).unwrap_err();
        assert_eq!(err.field(), "tolerance_cm");
    }

    #[test]
    fn every_rule_broken_reports_in_fixed_order() {
        let v = evaluate(&bag(40.0, 60.0, 30.0, 13.0), &jetsmart_cabin(), true).unwrap();
        assert_eq!(
            v.codes(),
            vec![
                ViolationCode::Width,
                ViolationCode::Length,
                ViolationCode::Height,
                ViolationCode::LinearSum,
                ViolationCode::Weight,
            ]
        );
        assert_eq!(v.excess_of(ViolationCode::Width), 4.0);
        assert_eq!(v.excess_of(ViolationCode::Length), 4.0);
        assert_eq!(v.excess_of(ViolationCode::Height), 4.0);
        assert_eq!(v.excess_of(ViolationCode::LinearSum), 15.0);
        assert_eq!(v.excess_of(ViolationCode::Weight), 3.0);

        let fees = v.fees.unwrap();
        assert_eq!(fees.oversize_fee, 30.0);
        assert_eq!(fees.overweight_fee, 45.0);
        assert_eq!(fees.total, 75.0);
        assert_eq!(fees.format_total(), "75.00 USD");
    }

    #[test]
    fn tolerance_does_not_relax_linear_sum() {
        // every axis within tolerance, sum 35.5 + 55.5 + 25.5 = 116.5 > 115
        let v = evaluate(&bag(35.5, 55.5, 25.5, 8.0), &jetsmart_cabin(), true).unwrap();
        assert_eq!(v.codes(), vec![ViolationCode::LinearSum]);
        assert_eq!(v.excess_of(ViolationCode::LinearSum), 1.5);
        assert_eq!(v.fees.unwrap().total, 30.0);
    }

    #[test]
    fn tolerance_does_not_relax_weight() {
        let v = evaluate(&bag(30.0, 50.0, 20.0, 10.5), &jetsmart_cabin(), true).unwrap();
        assert_eq!(v.codes(), vec![ViolationCode::Weight]);
    }

    #[test]
    fn fees_absent_when_not_requested() {
        let v = evaluate(&bag(40.0, 50.0, 20.0, 13.0), &jetsmart_cabin(), false).unwrap();
        assert!(!v.compliant);
        assert!(v.fees.is_none());
    }

    #[test]
    fn multiple_dimension_breaches_charge_oversize_once() {
        let v = evaluate(&bag(40.0, 60.0, 20.0, 8.0), &jetsmart_cabin(), true).unwrap();
        assert_eq!(v.violations.len(), 2);
        assert_eq!(v.fees.unwrap().oversize_fee, 30.0);
    }

    #[test]
    fn localized_keeps_codes_and_excess() {
        let v = evaluate(&bag(40.0, 50.0, 20.0, 13.0), &jetsmart_cabin(), true).unwrap();
        let es = v.clone().localized(Language::Es);
        assert_eq!(es.codes(), v.codes());
        assert_eq!(es.violations[0].excess, v.violations[0].excess);
        assert_eq!(es.violations[0].message, "Excede ancho por 4.0 cm");
        assert_eq!(es.violations[1].message, "Excede peso por 3.0 kg");
        assert_eq!(es.fees, v.fees);
    }

    #[test]
    fn zero_measurement_is_valid() {
        let v = evaluate(&bag(0.0, 0.0, 0.0, 0.0), &jetsmart_cabin(), true).unwrap();
        assert!(v.compliant);
    }
}
