use crate::util::num::{f64_to_u64_checked, u64_to_f64_checked};

/// Largest argument whose factorial is finite in `f64`.
const MAX_FINITE_FACTORIAL: u64 = 170;
/// The primorial of anything above this overflows `f64`.
const MAX_FINITE_PRIMORIAL: u64 = 1_000;

/// Whether a scalar counts as true. Zero is false, everything else is true.
#[must_use]
pub fn truthy(x: f64) -> bool {
    x != 0.0
}

/// Computes the multi-factorial `k (k-n) (k-2n) ...` down to 1.
///
/// The product is accumulated in `f64` and stops early once it overflows to
/// infinity.
///
/// ## Example
/// ```
/// use exprule::interpreter::evaluator::utils::multi_factorial;
///
/// assert_eq!(multi_factorial(5, 1), 120.0);
/// assert_eq!(multi_factorial(7, 2), 105.0); // 7 * 5 * 3 * 1
/// assert_eq!(multi_factorial(0, 2), 1.0);
/// ```
#[must_use]
pub fn multi_factorial(k: u64, n: u64) -> f64 {
    let mut result: f64 = 1.0;
    let mut current = k;

    while current > 1 && result.is_finite() {
        result *= u64_to_f64_checked(current).unwrap_or(f64::INFINITY);
        current = current.saturating_sub(n.max(1));
    }
    result
}

/// Computes the gamma function Γ(z) using the Lanczos approximation.
///
/// This implementation uses the standard 9-term Lanczos coefficients
/// (`g = 7`). For `z < 0.5`, the reflection formula is applied:
///
/// `Γ(z) = π / (sin(πz) * Γ(1 − z))`
///
/// At the poles (zero and the negative integers) the result is not finite.
///
/// # Example
/// ```
/// use exprule::interpreter::evaluator::utils::euler_gamma;
///
/// // Γ(5) = 4! = 24
/// let g = euler_gamma(5.0);
/// assert!((g - 24.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn euler_gamma(z: f64) -> f64 {
    // Lanczos coefficients, g = 7, n = 9.
    const COEFFS: [f64; 9] = [0.999_999_999_999_809_9,
                              676.520_368_121_885_1,
                              -1_259.139_216_722_402_8,
                              771.323_428_777_653_1,
                              -176.615_029_162_140_6,
                              12.507_343_278_686_905,
                              -0.138_571_095_265_720_12,
                              9.984_369_578_019_572e-6,
                              1.505_632_735_149_311_6e-7];
    const G: f64 = 7.0;

    if z < 0.5 {
        std::f64::consts::PI / ((std::f64::consts::PI * z).sin() * euler_gamma(1.0 - z))
    } else {
        let z_minus_1 = z - 1.0;
        let mut x = COEFFS[0];
        let mut offset = 1.0;

        for &c in COEFFS.iter().skip(1) {
            x += c / (z_minus_1 + offset);
            offset += 1.0;
        }

        let t = z_minus_1 + G + 0.5;

        std::f64::consts::TAU.sqrt() * t.powf(z_minus_1 + 0.5) * (-t).exp() * x
    }
}

/// Factorial, extended to non-integers through Γ(x + 1).
///
/// Negative integers have no factorial and yield NaN.
///
/// ## Example
/// ```
/// use exprule::interpreter::evaluator::utils::factorial;
///
/// assert_eq!(factorial(5.0), 120.0);
/// assert!((factorial(0.5) - 0.886_226_925_452_758).abs() < 1e-9);
/// assert!(factorial(-3.0).is_nan());
/// assert_eq!(factorial(171.0), f64::INFINITY);
/// ```
#[must_use]
pub fn factorial(x: f64) -> f64 {
    if is_huge_whole(x) {
        return f64::INFINITY;
    }

    match f64_to_u64_checked(x) {
        Some(k) if k > MAX_FINITE_FACTORIAL => f64::INFINITY,
        Some(k) => multi_factorial(k, 1),
        None if x.fract() == 0.0 => f64::NAN,
        None => euler_gamma(x + 1.0),
    }
}

/// Double factorial of a non-negative integer, NaN for anything else.
#[must_use]
pub fn double_factorial(x: f64) -> f64 {
    if is_huge_whole(x) {
        return f64::INFINITY;
    }

    f64_to_u64_checked(x).map_or(f64::NAN, |k| multi_factorial(k, 2))
}

/// Product of the primes up to `x`, for a non-negative integer `x`. NaN for
/// anything else.
///
/// ## Example
/// ```
/// use exprule::interpreter::evaluator::utils::primorial;
///
/// assert_eq!(primorial(10.0), 210.0); // 2 * 3 * 5 * 7
/// assert_eq!(primorial(1.0), 1.0);
/// assert!(primorial(2.5).is_nan());
/// ```
#[must_use]
pub fn primorial(x: f64) -> f64 {
    if is_huge_whole(x) {
        return f64::INFINITY;
    }

    match f64_to_u64_checked(x) {
        None => f64::NAN,
        Some(n) if n > MAX_FINITE_PRIMORIAL => f64::INFINITY,
        Some(n) => (2..=n).filter(|&k| is_prime(k))
                          .filter_map(u64_to_f64_checked)
                          .product(),
    }
}

/// Positive whole numbers too large to convert exactly, and infinity. Every
/// product-style operator overflows on these.
fn is_huge_whole(x: f64) -> bool {
    x > 0.0 && (x.is_infinite() || (x.fract() == 0.0 && f64_to_u64_checked(x).is_none()))
}

fn is_prime(k: u64) -> bool {
    k >= 2 && (2..).take_while(|d| d * d <= k).all(|d| k % d != 0)
}
