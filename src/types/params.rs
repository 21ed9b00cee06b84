//! Mining parameters and their validation

use crate::types::MiningError;

/// Default minimum support, as a fraction of all transactions
pub const DEFAULT_MIN_SUPPORT: f64 = 0.1;

/// Default minimum confidence for a rule to be reported
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

/// Rounding slack, in ulps of the product, applied when turning a support
/// fraction into a transaction count, so that `0.1 * 30` still means 3
/// transactions.
const SUPPORT_ROUNDING_ULPS: f64 = 4.0;

/// Thresholds for one analysis run
///
/// `min_support` must lie in (0, 1] and `min_confidence` in [0, 1]. The
/// optional `min_lift` drops weak rules and `max_len` caps itemset size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningParams {
    /// Minimum fraction of transactions an itemset must appear in
    pub min_support: f64,
    /// Minimum confidence of a reported rule
    pub min_confidence: f64,
    /// Minimum lift of a reported rule, if any
    pub min_lift: Option<f64>,
    /// Longest itemset to mine, if bounded
    pub max_len: Option<usize>,
}

impl Default for MiningParams {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            min_lift: None,
            max_len: None,
        }
    }
}

impl MiningParams {
    /// Create parameters with the two mandatory thresholds
    ///
    /// The values are not checked here; call [`MiningParams::validate`]
    /// before mining.
    pub fn new(min_support: f64, min_confidence: f64) -> Self {
        Self {
            min_support,
            min_confidence,
            ..Self::default()
        }
    }

    /// Set the minimum lift filter
    pub fn with_min_lift(mut self, min_lift: f64) -> Self {
        self.min_lift = Some(min_lift);
        self
    }

    /// Set the maximum itemset length
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Check every parameter against its valid range
    ///
    /// # Errors
    ///
    /// Returns `MiningError::InvalidParameter` naming the first offending
    /// parameter. NaN is rejected everywhere.
    pub fn validate(&self) -> Result<(), MiningError> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(MiningError::invalid_parameter(
                "min_support",
                self.min_support,
                "must be in (0, 1]",
            ));
        }

        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(MiningError::invalid_parameter(
                "min_confidence",
                self.min_confidence,
                "must be in [0, 1]",
            ));
        }

        if let Some(min_lift) = self.min_lift {
            if !(min_lift >= 0.0 && min_lift.is_finite()) {
                return Err(MiningError::invalid_parameter(
                    "min_lift",
                    min_lift,
                    "must be a finite value >= 0",
                ));
            }
        }

        if self.max_len == Some(0) {
            return Err(MiningError::invalid_parameter(
                "max_len",
                0.0,
                "must be at least 1",
            ));
        }

        Ok(())
    }

    /// Absolute support threshold for `total_transactions` baskets
    ///
    /// Computed as ⌈min_support × total⌉ and never less than 1, so an item
    /// must occur at least once to be frequent.
    pub fn min_support_count(&self, total_transactions: usize) -> u64 {
        let raw = self.min_support * total_transactions as f64;
        let count = (raw - raw * f64::EPSILON * SUPPORT_ROUNDING_ULPS).ceil();
        if count < 1.0 {
            1
        } else {
            count as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(MiningParams::default())]
    #[case::full_support(MiningParams::new(1.0, 1.0))]
    #[case::zero_confidence(MiningParams::new(0.01, 0.0))]
    #[case::with_lift(MiningParams::new(0.5, 0.5).with_min_lift(1.0))]
    #[case::with_max_len(MiningParams::new(0.5, 0.5).with_max_len(1))]
    fn test_validate_accepts(#[case] params: MiningParams) {
        assert!(params.validate().is_ok());
    }

    #[rstest]
    #[case::support_above_one(MiningParams::new(1.01, 0.5), "min_support")]
    #[case::support_zero(MiningParams::new(0.0, 0.5), "min_support")]
    #[case::support_negative(MiningParams::new(-0.2, 0.5), "min_support")]
    #[case::support_nan(MiningParams::new(f64::NAN, 0.5), "min_support")]
    #[case::confidence_negative(MiningParams::new(0.5, -0.01), "min_confidence")]
    #[case::confidence_above_one(MiningParams::new(0.5, 1.5), "min_confidence")]
    #[case::confidence_nan(MiningParams::new(0.5, f64::NAN), "min_confidence")]
    #[case::lift_negative(MiningParams::new(0.5, 0.5).with_min_lift(-1.0), "min_lift")]
    #[case::lift_infinite(MiningParams::new(0.5, 0.5).with_min_lift(f64::INFINITY), "min_lift")]
    #[case::max_len_zero(MiningParams::new(0.5, 0.5).with_max_len(0), "max_len")]
    fn test_validate_rejects(#[case] params: MiningParams, #[case] expected_name: &str) {
        let err = params.validate().unwrap_err();
        assert!(err.is_validation());
        match err {
            MiningError::InvalidParameter { name, .. } => assert_eq!(name, expected_name),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[rstest]
    #[case::exact_half(0.5, 4, 2)]
    #[case::rounds_up(0.3, 4, 2)]
    #[case::float_noise(0.1, 30, 3)]
    #[case::full(1.0, 7, 7)]
    #[case::tiny_support(0.001, 10, 1)]
    #[case::no_transactions(0.5, 0, 1)]
    #[case::scenario_d(0.02, 100, 2)]
    #[case::just_above_integer(0.30000000001, 10, 4)]
    #[case::large_total(0.3, 1_000_000, 300_000)]
    fn test_min_support_count(
        #[case] min_support: f64,
        #[case] total: usize,
        #[case] expected: u64,
    ) {
        let params = MiningParams::new(min_support, 0.5);
        assert_eq!(params.min_support_count(total), expected);
    }
}
