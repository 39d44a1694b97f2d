//! 参考RFC 8017 (PKCS #1 v2.2) 3.1, 3.2, 5.1
use crate::{CipherError, Rand};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use std::fmt::{Display, Formatter};
use utils::{byte_len, BigUintExt};

/// 2^16 + 1
pub const PUBLIC_EXPONENT: u32 = 65537;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    // n = p * q
    n: BigUint,
    // public exponent, gcd(e, lambda(n)) = 1
    e: BigUint,
}

#[derive(Clone, Debug)]
pub struct PrivateKey {
    pk: PublicKey,
    // d * e = 1 % lambda(n)
    d: BigUint,
    factor: Option<PrimeFactor>,
}

#[derive(Clone, Debug)]
struct PrimeFactor {
    p: BigUint,
    q: BigUint,
}

/// $\lambda(p*q) = \mathrm{lcm}(p-1, q-1) = (p-1)(q-1) / \gcd(p-1, q-1)$
///
/// note: p, q > 1
pub fn totient(p: &BigUint, q: &BigUint) -> BigUint {
    let (pm1, qm1) = (p - 1u32, q - 1u32);
    let g = pm1.gcd(&qm1);
    (pm1 * qm1) / g
}

impl PublicKey {
    /// n: RSA modulus
    /// e: public key exponent
    /// note: not to check the `n` and `exp` are right RSA parameters
    pub fn new_uncheck(n: BigUint, exp: BigUint) -> Self {
        Self { e: exp, n }
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// e
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// byte length `k` of the modulus
    pub fn key_len(&self) -> usize {
        byte_len(&self.n)
    }

    /// RSAEP: RSA Encrypt primitive, $m^e \mod n$
    pub fn rsaep(&self, m: &BigUint) -> Result<BigUint, CipherError> {
        if m < &self.n {
            Ok(m.modpow(&self.e, &self.n))
        } else {
            Err(CipherError::OutOfRange)
        }
    }
}

impl PrivateKey {
    /// note: not to check that `(modulus, public_exp, private_exp)` is a valid key pair
    pub fn new_uncheck(modulus: BigUint, public_exp: BigUint, private_exp: BigUint) -> Self {
        Self {
            pk: PublicKey::new_uncheck(modulus, public_exp),
            d: private_exp,
            factor: None,
        }
    }

    /// Build the key pair for the primes `p` and `q` with $e = 65537$.
    ///
    /// Fails with `NoInverse` when $\gcd(e, \lambda(n)) \ne 1$, the caller should pick new primes.
    pub fn from_primes(p: BigUint, q: BigUint) -> Result<Self, CipherError> {
        let three = BigUint::from(3u8);
        if p < three || q < three {
            return Err(CipherError::InvalidPrivateKey(
                "rsa: invalid prime value".to_string(),
            ));
        }

        if p == q {
            return Err(CipherError::InvalidPrivateKey(
                "rsa: the primes p and q must be distinct".to_string(),
            ));
        }

        let (n, lambda, e) = (&p * &q, totient(&p, &q), BigUint::from(PUBLIC_EXPONENT));
        let d = BigUintExt(&e)
            .modinv(&lambda)
            .ok_or(CipherError::NoInverse)?;

        Ok(Self {
            pk: PublicKey::new_uncheck(n, e),
            d,
            factor: Some(PrimeFactor { p, q }),
        })
    }

    /// Generates a key pair whose modulus has exactly `bits_len` bits.
    ///
    /// `prime_test_rounds` is the number of Miller-Rabin rounds applied to each prime candidate.
    /// Equal primes and primes whose totient is not coprime to `e` are discarded and drawn again.
    pub fn generate_key<R: Rand>(
        bits_len: usize,
        prime_test_rounds: usize,
        rd: &mut R,
    ) -> Result<PrivateKey, CipherError> {
        if bits_len < 16 {
            return Err(CipherError::InvalidKeySize(bits_len));
        }

        let (p_bits, q_bits) = ((bits_len + 1) >> 1, bits_len >> 1);
        loop {
            let p = BigUintExt::<BigUint>::generate_prime(p_bits, prime_test_rounds, rd)?;
            let q = BigUintExt::<BigUint>::generate_prime(q_bits, prime_test_rounds, rd)?;

            if p == q {
                log::warn!("rsa: drew the same prime twice, retrying");
                continue;
            }

            match Self::from_primes(p, q) {
                Ok(key) if key.pk.n.bits() as usize == bits_len => return Ok(key),
                Ok(_) => {
                    log::warn!("rsa: modulus is not {bits_len} bits long, retrying");
                }
                Err(CipherError::NoInverse) => {
                    log::warn!("rsa: e is not coprime to lambda(n), retrying with new primes");
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    /// d
    pub fn exponent(&self) -> &BigUint {
        &self.d
    }

    /// RSADP: RSA Decrypt primitive, $c^d \mod n$
    pub fn rsadp(&self, c: &BigUint) -> Result<BigUint, CipherError> {
        if c < &self.pk.n {
            Ok(c.modpow(&self.d, &self.pk.n))
        } else {
            Err(CipherError::OutOfRange)
        }
    }

    /// checks `n = p * q` and `d * e = 1 mod (p - 1)`, `d * e = 1 mod (q - 1)`
    pub fn is_valid(&self) -> Result<(), CipherError> {
        let factor = self
            .factor
            .as_ref()
            .ok_or(CipherError::InvalidPrivateKey(
                "rsa: factor doesn't exist".to_string(),
            ))?;

        let three = BigUint::from(3u8);
        if factor.p < three || factor.q < three {
            return Err(CipherError::InvalidPrivateKey(
                "rsa: invalid prime value".to_string(),
            ));
        }

        if &factor.p * &factor.q != self.pk.n {
            return Err(CipherError::InvalidPrivateKey(
                "rsa: invalid modulus".to_string(),
            ));
        }

        let de = &self.d * &self.pk.e;
        for prime in [&factor.p, &factor.q] {
            if !(&de % (prime - 1u32)).is_one() {
                return Err(CipherError::InvalidPrivateKey(
                    "rsa: invalid exponent".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{n={:#x}, e={:#x}}}", self.n, self.e)
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.factor.as_ref() {
            Some(factor) => write!(
                f,
                "{{pk: {}, d: {:#x}, factor: {{p: {:#x}, q: {:#x}}}}}",
                self.pk, self.d, factor.p, factor.q
            ),
            None => write!(f, "{{pk: {}, d: {:#x}, factor: []}}", self.pk, self.d),
        }
    }
}
