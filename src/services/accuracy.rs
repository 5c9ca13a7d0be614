/// Root-mean-square error between aligned actual and predicted sequences.
///
/// Positions beyond `predicted`'s length count as a prediction of zero.
/// Empty input returns 0 so callers never divide by zero downstream.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let sum_sq_err: f64 = actual
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let err = a - predicted.get(i).copied().unwrap_or(0.0);
            err * err
        })
        .sum();
    (sum_sq_err / actual.len() as f64).sqrt()
}

/// Mean absolute percentage error, in percent.
///
/// Entries whose actual value is zero are excluded from both the sum and the
/// count, so a gap-filled zero day never divides by zero. Returns 0 when no
/// entry qualifies.
pub fn mape(actual: &[f64], predicted: &[f64]) -> f64 {
    let mut sum_pct_err = 0.0;
    let mut counted = 0usize;
    for (i, a) in actual.iter().enumerate() {
        if *a == 0.0 {
            continue;
        }
        let p = predicted.get(i).copied().unwrap_or(0.0);
        sum_pct_err += ((a - p) / a).abs();
        counted += 1;
    }
    if counted == 0 {
        return 0.0;
    }
    sum_pct_err / counted as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn empty_inputs_yield_zero() {
        assert_eq!(rmse(&[], &[]), 0.0);
        assert_eq!(mape(&[], &[]), 0.0);
    }

    #[test]
    fn identical_sequences_have_zero_error() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(rmse(&values, &values), 0.0);
        assert_eq!(mape(&values, &values), 0.0);
    }

    #[test_case(&[3.0, 4.0], &[0.0, 0.0], 3.5355339059327378; "short predicted treated same as zeros")]
    #[test_case(&[3.0, 4.0], &[], 3.5355339059327378; "missing predictions count as zero")]
    #[test_case(&[1.0, 1.0], &[2.0, 0.0], 1.0; "symmetric errors")]
    fn rmse_cases(actual: &[f64], predicted: &[f64], expected: f64) {
        assert!((rmse(actual, predicted) - expected).abs() < 1e-12);
    }

    #[test]
    fn mape_skips_zero_actuals_entirely() {
        // the zero-actual entry is excluded from the count, not averaged as 0
        let actual = [0.0, 100.0];
        let predicted = [50.0, 90.0];
        assert!((mape(&actual, &predicted) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn mape_of_all_zero_actuals_is_zero() {
        assert_eq!(mape(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]), 0.0);
    }
}
