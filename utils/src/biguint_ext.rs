use crate::{byte_len, UtilsError};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rand;
use std::borrow::Borrow;
use std::ops::Deref;

pub struct BigUintExt<T: Borrow<BigUint>>(pub T);

impl<T: Borrow<BigUint>> Deref for BigUintExt<T> {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

// 3 * 5 * ... * 53
const SMALL_PRIMES: [u64; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];
const SMALL_PRIMES_PRODUCT: u64 = 16294579238595022365u64;

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// `self - 1 = 2^r * d`, d is odd. returns `(r, d)`
    ///
    /// note: self > 1
    pub fn decompose(&self) -> (u64, BigUint) {
        let n_m1 = self.deref() - 1u32;
        let r = n_m1.trailing_zeros().unwrap_or(0);
        (r, n_m1 >> r)
    }

    /// draw a witness uniformly from `[2, self - 2]`, resampling on a miss.
    /// `buf` must be `byte_len(self)` bytes long.
    ///
    /// note: self >= 5
    fn gen_witness<R: Rand>(&self, buf: &mut [u8], n_m2: &BigUint, rng: &mut R) -> BigUint {
        let excess = (buf.len() << 3) as u64 - self.bits();
        let top_mask = 0xffu8 >> excess;

        loop {
            rng.rand(buf);
            if let Some(x) = buf.first_mut() {
                *x &= top_mask;
            }

            let a = BigUint::from_bytes_be(buf);
            if a >= BigUint::from(2u8) && &a <= n_m2 {
                return a;
            }
        }
    }

    /// Miller-Rabin probable prime test with `rounds` random witnesses.
    ///
    /// For an odd composite the probability of a `true` answer is at most $4^{-rounds}$.
    /// Values below 2 are rejected, 2 and 3 are prime, other even values are composite.
    pub fn probably_prime_test<R: Rand>(&self, rounds: usize, rng: &mut R) -> bool {
        let n = self.deref();
        if n < &BigUint::from(2u8) {
            return false;
        } else if n <= &BigUint::from(3u8) {
            return true;
        } else if n.is_even() {
            return false;
        }

        let (r, d) = self.decompose();
        let (n_m1, n_m2) = (n - 1u32, n - 2u32);
        let mut buf = vec![0u8; byte_len(n)];

        for _ in 0..rounds {
            let a = self.gen_witness(&mut buf, &n_m2, rng);
            if self.miller_rabin_witness(r, &d, &n_m1, &a) {
                return false;
            }
        }

        true
    }

    /// 判断`a`是否是`self`为合数的证据
    fn miller_rabin_witness(&self, r: u64, d: &BigUint, n_m1: &BigUint, a: &BigUint) -> bool {
        let n = self.deref();
        let mut x = a.modpow(d, n);
        if x.is_one() || &x == n_m1 {
            return false;
        }

        for _ in 1..r {
            x = x.modpow(&BigUint::from(2u8), n);
            if &x == n_m1 {
                return false;
            }
        }

        true
    }

    /// generate a probable prime with exactly `bits_len` bits.
    ///
    /// The top two bits are set so that the product of two such primes has exactly
    /// `2 * bits_len` bits. Candidates with a small prime factor are skipped before
    /// running `probably_prime_test(test_rounds)`.
    pub fn generate_prime<R: Rand>(
        bits_len: usize,
        test_rounds: usize,
        rng: &mut R,
    ) -> Result<BigUint, UtilsError> {
        if bits_len < 2 {
            return Err(UtilsError::InvalidPrimeBits(bits_len));
        }

        let (mut p, b) = (
            vec![0u8; (bits_len + 7) >> 3],
            if (bits_len & 7) == 0 { 8 } else { bits_len & 7 },
        );
        let mut trials = 0usize;
        loop {
            trials += 1;
            rng.rand(p.as_mut_slice());

            // 清除大于bits_len的位, 并设置最高两位
            if b != 8 {
                p[0] &= (1u8 << b) - 1;
            }
            if b >= 2 {
                p[0] |= 3 << (b - 2);
            } else {
                p[0] |= 1;
                p[1] |= 0x80;
            }

            // 奇数
            if let Some(x) = p.last_mut() {
                *x |= 1;
            }

            let n = BigUint::from_bytes_be(p.as_slice());
            if bits_len > 6 {
                let rem = (&n % SMALL_PRIMES_PRODUCT)
                    .iter_u64_digits()
                    .next()
                    .unwrap_or(0);
                if SMALL_PRIMES.iter().any(|&x| rem % x == 0) {
                    continue;
                }
            }

            let n = BigUintExt(n);
            if n.bits() as usize == bits_len && n.probably_prime_test(test_rounds, rng) {
                log::debug!("found a {bits_len}-bit probable prime after {trials} trials");
                return Ok(n.0);
            }
        }
    }
}
