//! SCS curve-number runoff (Chapter 4 hydrology pipeline, step 2)
//!
//! Converts a cumulative rainfall depth into a cumulative runoff depth using the
//! SCS-NRCS curve number method.

use crate::error::{SimError, SimResult};

/// Initial abstraction ratio λ. The SCS standard default; exposed as a parameter
/// on [`scs_runoff`] rather than hard-coded so callers studying alternate
/// abstraction ratios don't need a second entry point.
pub const DEFAULT_LAMBDA: f64 = 0.2;

/// Potential maximum retention `S = 1000/CN - 10`, inches.
///
/// `cn` must be in (0, 100].
pub fn potential_retention(cn: f64) -> SimResult<f64> {
    if !(cn > 0.0 && cn <= 100.0) {
        return Err(SimError::invalid_input(
            "curveNumber",
            format!("must be in (0, 100], got {}", cn),
        ));
    }
    Ok(1000.0 / cn - 10.0)
}

/// Cumulative SCS runoff depth `Q` (inches) for cumulative rainfall depth `p`
/// (inches) and curve number `cn`.
///
/// `Q = 0` while `p <= lambda * S`; otherwise `Q = (p - Ia)^2 / (p - Ia + S)`
/// with `Ia = lambda * S`. Monotone non-decreasing in `p`, and `Q(p) <= p`.
pub fn scs_runoff(cn: f64, p: f64, lambda: f64) -> SimResult<f64> {
    if p < 0.0 {
        return Err(SimError::invalid_input(
            "p",
            format!("cumulative rainfall must be >= 0, got {}", p),
        ));
    }
    let s = potential_retention(cn)?;
    let ia = lambda * s;

    if p <= ia {
        return Ok(0.0);
    }
    let excess = p - ia;
    Ok(excess * excess / (excess + s))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario 1 — SCS runoff, CN=80, P=4.0 in
    #[test]
    fn test_scenario_1_scs_runoff() {
        let q = scs_runoff(80.0, 4.0, DEFAULT_LAMBDA).unwrap();
        assert!((q - 2.042).abs() < 0.01, "got {}", q);
    }

    #[test]
    fn test_runoff_zero_below_abstraction() {
        // S = 1000/50 - 10 = 10, Ia = 2.0
        let q = scs_runoff(50.0, 1.0, DEFAULT_LAMBDA).unwrap();
        assert_eq!(q, 0.0);
    }

    #[test]
    fn test_runoff_monotone_and_bounded() {
        let cn = 75.0;
        let mut prev = 0.0;
        let mut p = 0.0;
        while p <= 10.0 {
            let q = scs_runoff(cn, p, DEFAULT_LAMBDA).unwrap();
            assert!(q >= prev - 1e-12);
            assert!(q <= p + 1e-12);
            prev = q;
            p += 0.25;
        }
    }

    #[test]
    fn test_invalid_cn_rejected() {
        assert!(scs_runoff(0.0, 1.0, DEFAULT_LAMBDA).is_err());
        assert!(scs_runoff(100.1, 1.0, DEFAULT_LAMBDA).is_err());
        assert!(scs_runoff(-5.0, 1.0, DEFAULT_LAMBDA).is_err());
    }

    #[test]
    fn test_negative_rainfall_rejected() {
        assert!(scs_runoff(80.0, -1.0, DEFAULT_LAMBDA).is_err());
    }
}
