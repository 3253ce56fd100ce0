//! Integer arithmetic helpers
//!
//! One shared home for the extended Euclid / modular inverse pair that the
//! congruential scheme needs, tested independently of the lattice core.

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`. The gcd carries the
/// sign of the inputs' gcd as computed by the classical recursion; callers
/// wanting coprimality should compare `g.abs()` to 1 or pass non-negative
/// arguments.
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        return (a, 1, 0);
    }
    let (g, x1, y1) = extended_gcd(b, a % b);
    (g, y1, x1 - (a / b) * y1)
}

/// Modular inverse of `a` modulo `m`, or `None` when `gcd(a, m) != 1`.
pub fn mod_inverse(a: i128, m: i128) -> Option<i128> {
    let (g, x, _) = extended_gcd(a.rem_euclid(m), m);
    if g.abs() != 1 {
        return None;
    }
    // g can only be +1 here since both arguments were non-negative.
    Some(x.rem_euclid(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_gcd_identity() {
        let cases = [(240i128, 46i128), (17, 5), (1, 1), (100, 0), (0, 7), (35, 49)];
        for (a, b) in cases {
            let (g, x, y) = extended_gcd(a, b);
            assert_eq!(a * x + b * y, g, "Bezout identity failed for ({}, {})", a, b);
        }
        assert_eq!(extended_gcd(240, 46).0, 2);
        assert_eq!(extended_gcd(35, 49).0, 7);
    }

    #[test]
    fn test_extended_gcd_negative_inputs() {
        let (g, x, y) = extended_gcd(-240, 46);
        assert_eq!(-240 * x + 46 * y, g);
        assert_eq!(g.abs(), 2);
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(3, 7), Some(5));
        assert_eq!(mod_inverse(10, 17), Some(12));
        assert_eq!(mod_inverse(6, 9), None);

        // Negative representative of the same class.
        let inv = mod_inverse(-3, 7).unwrap();
        assert_eq!((-3i128 * inv).rem_euclid(7), 1);
    }

    #[test]
    fn test_mod_inverse_roundtrip() {
        let m = 100_003i128;
        for a in [2i128, 137, 54_321, 99_999] {
            let inv = mod_inverse(a, m).unwrap();
            assert_eq!((a * inv).rem_euclid(m), 1);
        }
    }
}
