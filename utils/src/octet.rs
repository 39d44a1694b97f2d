//! RFC 8017 4.1/4.2: I2OSP and OS2IP
//!
//! Octet strings are big-endian: the first byte carries the most significant bits.
//! Conversions between naturals and bytes elsewhere in the workspace go through here.

use crate::UtilsError;
use num_bigint::BigUint;

/// 表示`x`所需的最少字节数, `byte_len(0) == 0`
pub fn byte_len(x: &BigUint) -> usize {
    ((x.bits() + 7) >> 3) as usize
}

/// OS2IP: octet string to natural. The result is never negative, whatever the high bit
/// of `x[0]` is. The empty string maps to zero.
pub fn os2ip(x: &[u8]) -> BigUint {
    BigUint::from_bytes_be(x)
}

/// I2OSP: natural to octet string.
///
/// With `len == None` the minimal encoding is produced (zero encodes to the empty string).
/// With `Some(len)` the output has exactly `len` bytes, left padded with `0x00`.
pub fn i2osp(x: &BigUint, len: Option<usize>) -> Result<Vec<u8>, UtilsError> {
    let min_len = byte_len(x);
    let Some(len) = len else {
        return Ok(if min_len == 0 { Vec::new() } else { x.to_bytes_be() });
    };

    if min_len > len {
        return Err(UtilsError::IntegerTooLarge { len });
    }

    let mut out = vec![0u8; len];
    if min_len > 0 {
        out[(len - min_len)..].copy_from_slice(&x.to_bytes_be());
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{byte_len, i2osp, os2ip};
    use crate::UtilsError;
    use num_bigint::BigUint;
    use num_traits::{Num, Zero};

    #[test]
    fn high_bit_is_not_a_sign() {
        let n = os2ip(&[0xff, 0x00]);
        assert_eq!(n, BigUint::from(0xff00u32));
        assert_eq!(os2ip(&[0x80]), BigUint::from(128u32));
    }

    #[test]
    fn minimal_encoding() {
        assert_eq!(i2osp(&BigUint::zero(), None).unwrap(), Vec::<u8>::new());
        assert_eq!(i2osp(&BigUint::from(1u8), None).unwrap(), vec![1u8]);
        assert_eq!(
            i2osp(&BigUint::from(0x010203u32), None).unwrap(),
            vec![1u8, 2, 3]
        );
        assert_eq!(byte_len(&BigUint::from(0x100u32)), 2);
        assert_eq!(byte_len(&BigUint::zero()), 0);
    }

    #[test]
    fn fixed_length_padding() {
        let x = BigUint::from(0xabcdu32);
        assert_eq!(i2osp(&x, Some(4)).unwrap(), vec![0u8, 0, 0xab, 0xcd]);
        assert_eq!(i2osp(&x, Some(2)).unwrap(), vec![0xabu8, 0xcd]);
        assert_eq!(i2osp(&BigUint::zero(), Some(3)).unwrap(), vec![0u8; 3]);
        assert_eq!(
            i2osp(&x, Some(1)),
            Err(UtilsError::IntegerTooLarge { len: 1 })
        );
        assert_eq!(
            i2osp(&BigUint::from(1u8), Some(0)),
            Err(UtilsError::IntegerTooLarge { len: 0 })
        );
    }

    #[test]
    fn counter_is_big_endian() {
        // MGF1 counters are 4-byte big-endian
        let c = i2osp(&BigUint::from(0x01020304u32), Some(4)).unwrap();
        assert_eq!(c, 0x01020304u32.to_be_bytes());
    }

    #[test]
    fn round_trip() {
        let cases = [
            "0",
            "1",
            "ff",
            "100",
            "8000000000000000000000000000000000000000",
            "c0ffee00c0ffee00c0ffee00c0ffee00c0ffee00c0ffee00c0ffee00c0ffee00",
        ];

        for s in cases {
            let n = BigUint::from_str_radix(s, 16).unwrap();
            let b = i2osp(&n, None).unwrap();
            assert_eq!(os2ip(&b), n, "case => {s}");
        }

        // leading zero bytes survive when the length is restored
        let bytes = [0u8, 0, 7, 0, 0xff];
        let n = os2ip(&bytes);
        assert_eq!(i2osp(&n, Some(bytes.len())).unwrap(), bytes.to_vec());
    }
}
