use crate::BigUintExt;
use num_bigint::{BigInt, BigUint};
use num_traits::{Euclid, One, Zero};
use std::borrow::Borrow;
use std::mem;
use std::ops::Deref;

/// `gcd = x * a + y * modulus (mod modulus)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedGcd {
    pub gcd: BigUint,
    /// a^{-1} mod modulus when gcd == 1
    pub x: BigUint,
    pub y: BigUint,
}

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// Iterative extended Euclidean algorithm.
    ///
    /// The Bézout coefficients may go negative during the iteration, so they are tracked as
    /// `BigInt` and reduced into `[0, modulus)` at the end.
    /// A zero `modulus` gives `gcd = self` with the unreduced coefficients `(1, 0)`.
    pub fn extended_gcd(&self, modulus: &BigUint) -> ExtendedGcd {
        if modulus.is_zero() {
            return ExtendedGcd {
                gcd: self.deref().clone(),
                x: BigUint::one(),
                y: BigUint::zero(),
            };
        }

        let m = BigInt::from(modulus.clone());
        let (mut r_old, mut r_new) = (m.clone(), BigInt::from(self.deref().clone()));
        let (mut d_old, mut d_new) = (BigInt::zero(), BigInt::one());
        let (mut t_old, mut t_new) = (BigInt::one(), BigInt::zero());

        while !r_new.is_zero() {
            let q = &r_old / &r_new;

            let r = &r_old - &q * &r_new;
            r_old = mem::replace(&mut r_new, r);

            let d = &d_old - &q * &d_new;
            d_old = mem::replace(&mut d_new, d);

            let t = &t_old - &q * &t_new;
            t_old = mem::replace(&mut t_new, t);
        }

        ExtendedGcd {
            gcd: r_old.magnitude().clone(),
            x: d_old.rem_euclid(&m).magnitude().clone(),
            y: t_old.rem_euclid(&m).magnitude().clone(),
        }
    }

    /// self * inv = 1 \mod modulus
    pub fn modinv(&self, modulus: &BigUint) -> Option<BigUint> {
        let g = self.extended_gcd(modulus);
        (!modulus.is_zero() && g.gcd.is_one()).then_some(g.x)
    }
}
