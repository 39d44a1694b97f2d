//! RFC 8017 B.2.1: MGF1
//!
//! `T = Hash(seed || C(0)) || Hash(seed || C(1)) || ...`, truncated to the mask length,
//! where `C(i)` is the counter as a 4-byte big-endian octet string.

use crate::CipherError;
use digest::Digest;

fn check_mask_len<H: Digest>(mask_len: usize) -> Result<(), CipherError> {
    let hlen = <H as Digest>::output_size() as u64;
    if mask_len as u64 > (hlen << 32) {
        Err(CipherError::MaskTooLong)
    } else {
        Ok(())
    }
}

/// generate a mask of `mask_len` bytes from `seed`
pub fn mgf1<H: Digest>(seed: &[u8], mask_len: usize) -> Result<Vec<u8>, CipherError> {
    let mut mask = vec![0u8; mask_len];
    mgf1_xor::<H>(mask.as_mut_slice(), seed)?;
    Ok(mask)
}

/// `out ^= MGF1(seed, out.len())`
pub fn mgf1_xor<H: Digest>(out: &mut [u8], seed: &[u8]) -> Result<(), CipherError> {
    check_mask_len::<H>(out.len())?;

    let hlen = <H as Digest>::output_size();
    for (cnt, block) in out.chunks_mut(hlen).enumerate() {
        let digest = H::new()
            .chain_update(seed)
            .chain_update((cnt as u32).to_be_bytes())
            .finalize();

        block
            .iter_mut()
            .zip(digest.iter())
            .for_each(|(a, &b)| *a ^= b);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{mgf1, mgf1_xor};
    use digest::Digest;
    use sha2::Sha256;

    #[test]
    fn first_blocks_are_counter_hashes() {
        let seed = b"mgf1 seed";
        let mask = mgf1::<Sha256>(seed, 70).unwrap();
        assert_eq!(mask.len(), 70);

        let mut h0 = Sha256::new();
        h0.update(seed);
        h0.update([0u8, 0, 0, 0]);
        assert_eq!(&mask[..32], h0.finalize().as_slice());

        let mut h2 = Sha256::new();
        h2.update(seed);
        h2.update([0u8, 0, 0, 2]);
        assert_eq!(&mask[64..], &h2.finalize()[..6]);
    }

    #[test]
    fn shorter_mask_is_a_prefix() {
        let seed = [0x5au8; 32];
        let long = mgf1::<Sha256>(&seed, 200).unwrap();
        for len in [0usize, 1, 31, 32, 33, 64, 199] {
            assert_eq!(mgf1::<Sha256>(&seed, len).unwrap(), long[..len].to_vec());
        }
    }

    #[test]
    fn xor_in_place() {
        let seed = b"seed";
        let mask = mgf1::<Sha256>(seed, 45).unwrap();

        let data: Vec<u8> = (0u8..45).collect();
        let mut out = data.clone();
        mgf1_xor::<Sha256>(out.as_mut_slice(), seed).unwrap();
        for i in 0..45 {
            assert_eq!(out[i], data[i] ^ mask[i]);
        }

        // applying the mask twice restores the data
        mgf1_xor::<Sha256>(out.as_mut_slice(), seed).unwrap();
        assert_eq!(out, data);
    }
}
