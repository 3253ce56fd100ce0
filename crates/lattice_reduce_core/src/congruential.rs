//! Congruential public-key scheme and its lattice attack
//!
//! A toy scheme over a modulus q: the private pair (f, g) satisfies
//! f < √(q/2), √(q/4) < g < √(q/2), gcd(f, q) = 1, and the public value is
//! h = f⁻¹·g mod q. Encryption of m < √(q/4) with ephemeral r < √(q/2) is
//! e = r·h + m mod q; decryption computes a = f·e mod q, then
//! b = f⁻¹·a mod g.
//!
//! The size bounds on (f, g) are exactly what the attack exploits: (f, g)
//! is a short vector in the 2-dimensional lattice spanned by (1, h) and
//! (0, q), since f·(1, h) − k·(0, q) = (f, g) when f·h ≡ g (mod q).
//! Gaussian pair reduction finds it directly.
//!
//! All values are explicit request/response data; there is no process-wide
//! key or session state. Moduli are kept below 10^8: the pair reduction's
//! dot products then peak near 2^53 and are accurate to a few ulps, while
//! the vectors themselves stay integer-valued and shrink quickly below
//! 2^53, so rounding the reduced coordinates back to i128 is unambiguous.

use num_integer::Integer;
use rand::Rng;

use crate::arith::mod_inverse;
use crate::error::{LatticeError, Result};
use crate::gauss::reduce_pair;
use crate::vector::Vector;

const Q_MIN: i128 = 10_000_000;
const Q_MAX: i128 = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublicKey {
    pub q: i128,
    pub h: i128,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrivateKey {
    pub f: i128,
    pub g: i128,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

/// Outcome of the key-recovery attack. `Failed` is a normal negative
/// result: neither reduced row met the size and coprimality bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    Recovered { f: i128, g: i128 },
    Failed,
}

/// Attack outcome plus the full Gauss reduction trace for replay.
#[derive(Debug, Clone)]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    pub trace: Vec<(Vector, Vector)>,
}

impl KeyPair {
    /// Generate a fresh key pair: q uniform in [10^7, 10^8), then secrets
    /// resampled until gcd(f, q) = 1.
    pub fn generate<R: Rng>(rng: &mut R) -> KeyPair {
        let q = rng.gen_range(Q_MIN..Q_MAX);
        let f_upper = ((q as f64) / 2.0).sqrt() as i128;
        let g_lower = ((q as f64) / 4.0).sqrt() as i128;

        loop {
            let f = rng.gen_range(1..=f_upper);
            let g = rng.gen_range(g_lower..=f_upper);
            if f.gcd(&q) != 1 {
                continue;
            }
            if let Ok(kp) = Self::from_parts(q, f, g) {
                return kp;
            }
        }
    }

    /// Build a key pair from explicit parts, validating the size bounds the
    /// attack relies on.
    pub fn from_parts(q: i128, f: i128, g: i128) -> Result<KeyPair> {
        if q <= 1 {
            return Err(LatticeError::InvalidParameter(format!("modulus q must exceed 1, got {}", q)));
        }
        let qf = q as f64;
        if f < 1 || (f as f64) >= (qf / 2.0).sqrt() {
            return Err(LatticeError::InvalidParameter(format!(
                "f must satisfy 1 <= f < sqrt(q/2), got f = {}",
                f
            )));
        }
        if (g as f64) <= (qf / 4.0).sqrt() || (g as f64) >= (qf / 2.0).sqrt() {
            return Err(LatticeError::InvalidParameter(format!(
                "g must satisfy sqrt(q/4) < g < sqrt(q/2), got g = {}",
                g
            )));
        }
        let f_inverse = mod_inverse(f, q).ok_or_else(|| {
            LatticeError::InvalidParameter(format!("f = {} is not invertible mod q = {}", f, q))
        })?;
        let h = (f_inverse * g).rem_euclid(q);

        Ok(KeyPair {
            public: PublicKey { q, h },
            private: PrivateKey { f, g },
        })
    }
}

/// Encrypt `m` with ephemeral value `r`: e = r·h + m mod q.
///
/// Requires m < √(q/4) and 1 ≤ r < √(q/2); out-of-range values would not
/// decrypt uniquely.
pub fn encrypt(public: &PublicKey, m: i128, r: i128) -> Result<i128> {
    let qf = public.q as f64;
    if m < 0 || (m as f64) >= (qf / 4.0).sqrt() {
        return Err(LatticeError::InvalidParameter(format!(
            "plaintext must satisfy 0 <= m < sqrt(q/4), got {}",
            m
        )));
    }
    if r < 1 || (r as f64) >= (qf / 2.0).sqrt() {
        return Err(LatticeError::InvalidParameter(format!(
            "ephemeral must satisfy 1 <= r < sqrt(q/2), got {}",
            r
        )));
    }
    Ok((r * public.h + m).rem_euclid(public.q))
}

/// Decrypt e: a = f·e mod q, then b = f⁻¹·a mod g.
pub fn decrypt(keypair: &KeyPair, e: i128) -> Result<i128> {
    let (f, g) = (keypair.private.f, keypair.private.g);
    let a = (f * e).rem_euclid(keypair.public.q);
    let f_inv_mod_g = mod_inverse(f, g).ok_or_else(|| {
        LatticeError::InvalidParameter(format!("f = {} is not invertible mod g = {}", f, g))
    })?;
    Ok((f_inv_mod_g * a).rem_euclid(g))
}

/// Recover a candidate private pair from the public key alone.
///
/// Gauss-reduces the rows (1, h) and (0, q); a reduced row qualifies when
/// its first coordinate is below √(q/2) in absolute value and coprime to q.
/// The first qualifying row (v1, then v2) is returned; both failing is the
/// `Failed` outcome, reported with the trace rather than an error.
pub fn attack(public: &PublicKey) -> Result<AttackResult> {
    let q = public.q;
    let reduction = reduce_pair(
        Vector::new(vec![1.0, public.h as f64]),
        Vector::new(vec![0.0, q as f64]),
    )?;

    let bound = ((q as f64) / 2.0).sqrt();
    let qualifies = |row: &Vector| -> Option<(i128, i128)> {
        let f = row[0].round() as i128;
        let g = row[1].round() as i128;
        if (f.abs() as f64) < bound && f.gcd(&q) == 1 {
            Some((f, g))
        } else {
            None
        }
    };

    let outcome = if let Some((f, g)) = qualifies(&reduction.v1) {
        AttackOutcome::Recovered { f, g }
    } else if let Some((f, g)) = qualifies(&reduction.v2) {
        AttackOutcome::Recovered { f, g }
    } else {
        AttackOutcome::Failed
    };

    Ok(AttackResult { outcome, trace: reduction.steps })
}
