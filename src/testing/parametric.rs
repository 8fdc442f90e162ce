//! Parametric two-sample tests.
//!
//! Implements Student's and Welch's t-tests in a summary-statistic form:
//! per-group sums and sums of squares are accumulated once, and the test is
//! computed directly from them. This keeps the per-gene loop over a dense
//! expression matrix a single pass.

use num_traits::Float;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::testing::{TTestType, TestResult};

/// Perform a t-test comparing two samples.
///
/// # Arguments
///
/// * `x` - First sample
/// * `y` - Second sample
/// * `test_type` - Type of t-test to perform (Student's or Welch's)
///
/// # Returns
///
/// `TestResult` containing the t-statistic and two-sided p-value. Groups with
/// fewer than two observations yield the null result `(0, 1)`.
pub fn t_test<T>(x: &[T], y: &[T], test_type: TTestType) -> TestResult
where
    T: Float,
{
    if x.len() < 2 || y.len() < 2 {
        return TestResult::new(0.0, 1.0);
    }

    let mut sum_x = T::zero();
    let mut sum_sq_x = T::zero();
    for &val in x {
        sum_x = sum_x + val;
        sum_sq_x = sum_sq_x + val * val;
    }

    let mut sum_y = T::zero();
    let mut sum_sq_y = T::zero();
    for &val in y {
        sum_y = sum_y + val;
        sum_sq_y = sum_sq_y + val * val;
    }

    t_test_from_sums(
        sum_x.to_f64().unwrap(),
        sum_sq_x.to_f64().unwrap(),
        x.len() as f64,
        sum_y.to_f64().unwrap(),
        sum_sq_y.to_f64().unwrap(),
        y.len() as f64,
        test_type,
    )
}

/// Perform a t-test using precomputed summary statistics.
///
/// Computes the test directly from sums and sums of squares, avoiding any
/// need to revisit the original data. Variances use the corrected (n − 1)
/// form, as in a standard two-sample t-test.
///
/// # Arguments
///
/// * `sum1`, `sum_sq1`, `n1` - Sum, sum of squares, and count for group 1
/// * `sum2`, `sum_sq2`, `n2` - Sum, sum of squares, and count for group 2
/// * `test_type` - Type of t-test to perform (Student's or Welch's)
///
/// # Returns
///
/// `TestResult` containing the t-statistic, two-sided p-value, and degrees of
/// freedom.
pub fn t_test_from_sums(
    sum1: f64,
    sum_sq1: f64,
    n1: f64,
    sum2: f64,
    sum_sq2: f64,
    n2: f64,
    test_type: TTestType,
) -> TestResult {
    if n1 < 2.0 || n2 < 2.0 {
        return TestResult::new(0.0, 1.0);
    }

    let mean1 = sum1 / n1;
    let mean2 = sum2 / n2;

    let var1 = (sum_sq1 - sum1 * sum1 / n1) / (n1 - 1.0);
    let var2 = (sum_sq2 - sum2 * sum2 / n2) / (n2 - 1.0);

    let mean_diff = mean1 - mean2;

    let (t_stat, df) = match test_type {
        TTestType::Student => {
            let pooled_var = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / (n1 + n2 - 2.0);
            let std_err = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();
            (mean_diff / std_err, n1 + n2 - 2.0)
        }
        TTestType::Welch => {
            let term1 = var1 / n1;
            let term2 = var2 / n2;
            let combined_var = term1 + term2;
            let t = mean_diff / combined_var.sqrt();

            // Welch-Satterthwaite equation for degrees of freedom
            let df = combined_var * combined_var
                / (term1 * term1 / (n1 - 1.0) + term2 * term2 / (n2 - 1.0));
            (t, df)
        }
    };

    TestResult::new(t_stat, two_sided_p_value(t_stat, df)).with_degrees_of_freedom(df)
}

/// Two-sided p-value of a t-statistic under a Students-t null with `df`
/// degrees of freedom.
fn two_sided_p_value(t_stat: f64, df: f64) -> f64 {
    if !t_stat.is_finite() {
        return if t_stat.is_infinite() { 0.0 } else { 1.0 };
    }
    if df <= 0.0 || !df.is_finite() {
        return 1.0;
    }

    let abs_t = t_stat.abs();

    // p ≈ 1 for vanishing effects, no distribution needed
    if abs_t < 1e-3 {
        return 1.0;
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => 2.0 * (1.0 - t_dist.cdf(abs_t)),
        Err(_) => 1.0,
    }
}
