//! Reconciliation evaluation.

use rust_decimal::Decimal;

use super::types::{ControlComparison, Discrepancy, RunStatus, Severity};

/// Stateless reconciliation evaluator.
pub struct ReconService;

impl ReconService {
    /// Evaluates a set of control comparisons.
    ///
    /// For each comparison, `variance = expected - actual`. Variances
    /// within the tolerance are dropped; the rest become discrepancies
    /// with severity scaled to magnitude. The run status is the worst
    /// severity seen.
    #[must_use]
    pub fn evaluate(
        comparisons: &[ControlComparison],
        tolerance: Decimal,
        critical_variance: Decimal,
    ) -> (RunStatus, Vec<Discrepancy>) {
        let mut discrepancies = Vec::new();

        for comparison in comparisons {
            let variance = comparison.expected - comparison.actual;
            if variance.abs() <= tolerance {
                continue;
            }
            discrepancies.push(Discrepancy {
                role: comparison.role,
                expected: comparison.expected,
                actual: comparison.actual,
                variance,
                severity: Self::severity_for(variance, critical_variance),
            });
        }

        let status = if discrepancies.is_empty() {
            RunStatus::Success
        } else if discrepancies
            .iter()
            .any(|d| d.severity == Severity::Critical)
        {
            RunStatus::Failed
        } else {
            RunStatus::Warning
        };

        (status, discrepancies)
    }

    /// Scales severity with the variance magnitude.
    #[must_use]
    pub fn severity_for(variance: Decimal, critical_variance: Decimal) -> Severity {
        if variance.abs() > critical_variance {
            Severity::Critical
        } else {
            Severity::Warning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::coa::ControlRole;

    fn comparison(expected: Decimal, actual: Decimal) -> ControlComparison {
        ControlComparison {
            role: ControlRole::Receivables,
            expected,
            actual,
        }
    }

    #[test]
    fn test_within_tolerance_is_success() {
        let comparisons = vec![comparison(dec!(1500.00), dec!(1500.00))];
        let (status, discrepancies) =
            ReconService::evaluate(&comparisons, dec!(0.01), dec!(1000.00));
        assert_eq!(status, RunStatus::Success);
        assert!(discrepancies.is_empty());
    }

    #[test]
    fn test_rounding_noise_within_tolerance() {
        let comparisons = vec![comparison(dec!(1500.00), dec!(1500.01))];
        let (status, discrepancies) =
            ReconService::evaluate(&comparisons, dec!(0.01), dec!(1000.00));
        assert_eq!(status, RunStatus::Success);
        assert!(discrepancies.is_empty());
    }

    #[test]
    fn test_small_variance_is_warning() {
        let comparisons = vec![comparison(dec!(1500.00), dec!(1450.00))];
        let (status, discrepancies) =
            ReconService::evaluate(&comparisons, dec!(0.01), dec!(1000.00));
        assert_eq!(status, RunStatus::Warning);
        assert_eq!(discrepancies.len(), 1);
        assert_eq!(discrepancies[0].variance, dec!(50.00));
        assert_eq!(discrepancies[0].severity, Severity::Warning);
    }

    #[test]
    fn test_large_variance_is_critical() {
        let comparisons = vec![comparison(dec!(5000.00), dec!(1000.00))];
        let (status, discrepancies) =
            ReconService::evaluate(&comparisons, dec!(0.01), dec!(1000.00));
        assert_eq!(status, RunStatus::Failed);
        assert_eq!(discrepancies[0].severity, Severity::Critical);
    }

    #[test]
    fn test_negative_variance_uses_magnitude() {
        let comparisons = vec![comparison(dec!(1000.00), dec!(5000.00))];
        let (status, discrepancies) =
            ReconService::evaluate(&comparisons, dec!(0.01), dec!(1000.00));
        assert_eq!(status, RunStatus::Failed);
        assert_eq!(discrepancies[0].variance, dec!(-4000.00));
        assert_eq!(discrepancies[0].severity, Severity::Critical);
    }

    #[test]
    fn test_worst_severity_wins() {
        let comparisons = vec![
            comparison(dec!(100.00), dec!(90.00)),
            ControlComparison {
                role: ControlRole::Payables,
                expected: dec!(9000.00),
                actual: dec!(1000.00),
            },
        ];
        let (status, discrepancies) =
            ReconService::evaluate(&comparisons, dec!(0.01), dec!(1000.00));
        assert_eq!(status, RunStatus::Failed);
        assert_eq!(discrepancies.len(), 2);
    }
}
