//! 随机数源
//!
//! Every component that consumes entropy takes a `&mut impl Rand`, so the source is always
//! injected by the caller. Only cryptographically secure generators implement the trait.

use xrand::{CryptoRng, RngCore};

pub trait Rand {
    /// fill all of `random` with unpredictable bytes
    fn rand(&mut self, random: &mut [u8]);
}

mod default_rand;
pub use default_rand::DefaultRand;

impl<T: RngCore + CryptoRng> Rand for T {
    fn rand(&mut self, random: &mut [u8]) {
        self.fill_bytes(random);
    }
}

#[cfg(test)]
mod tests {
    use crate::{DefaultRand, Rand};
    use xrand::rngs::StdRng;
    use xrand::SeedableRng;

    #[test]
    fn default_rand_fill() {
        let mut rng = DefaultRand::default();
        let (mut a, mut b) = ([0u8; 64], [0u8; 64]);
        rng.rand(&mut a);
        rng.rand(&mut b);
        assert_ne!(a, b, "two 64-byte draws from the os source must differ");
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let (mut r1, mut r2) = (StdRng::seed_from_u64(7), StdRng::seed_from_u64(7));
        let (mut a, mut b) = ([0u8; 32], [0u8; 32]);
        r1.rand(&mut a);
        r2.rand(&mut b);
        assert_eq!(a, b);

        // the generator advances, it is not re-created per call
        r1.rand(&mut a);
        assert_ne!(a, b);
    }
}
