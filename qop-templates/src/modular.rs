//! Integer helpers for modular arithmetic templates

/// Greatest common divisor
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Inverse of `k` modulo `modulus` by the extended Euclidean algorithm
///
/// Returns `None` when `gcd(k, modulus) != 1` or `modulus == 0`. For
/// `modulus == 1` every value is congruent to 0, which is its own inverse.
///
/// # Example
/// ```
/// use qop_templates::modular::mod_inverse;
///
/// assert_eq!(mod_inverse(4, 7), Some(2));
/// assert_eq!(mod_inverse(2, 4), None);
/// ```
pub fn mod_inverse(k: u64, modulus: u64) -> Option<u64> {
    if modulus == 0 {
        return None;
    }
    if modulus == 1 {
        return Some(0);
    }
    let m = i128::from(modulus);
    let (mut old_r, mut r) = (i128::from(k % modulus), m);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    u64::try_from(old_s.rem_euclid(m)).ok()
}
