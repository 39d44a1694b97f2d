//! = RFC 8017
//!
//! == PKCS #1: RSA Cryptography Specification Version 2.2
//!
//! === OAEP(Optimal Asymmetric Encryption Padding)
//!
//! ```text
//! DB = lHash || PS || 0x01 || M
//! EM = 0x00 || (seed ^ MGF(maskedDB, hLen)) || (DB ^ MGF(seed, k - hLen - 1))
//! ```

use crate::rsa::{mgf1_xor, PrivateKey, PublicKey};
use crate::{CipherError, Decrypt, Encrypt, Rand};
use digest::Digest;
use std::cell::RefCell;
use std::io::{Read, Write};
use std::marker::PhantomData;
use utils::{i2osp, os2ip};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// Optimal Asymmetric Encryption Padding
pub struct OAEPEncrypt<H: Digest, R: Rand> {
    key: PublicKey,
    rng: RefCell<R>,
    hlen: usize,
    label: Vec<u8>,
    // Hash(label)
    lhash: Vec<u8>,
    hasher: PhantomData<H>,
}

pub struct OAEPDecrypt<H: Digest, R: Rand> {
    de: OAEPEncrypt<H, R>,
    key: PrivateKey,
}

// 0xff if x == 0, otherwise 0x00
#[inline]
fn ct_is_zero(x: u8) -> u8 {
    ((x as u16).wrapping_sub(1) >> 8) as u8
}

#[inline]
fn ct_eq(a: u8, b: u8) -> u8 {
    ct_is_zero(a ^ b)
}

// mask == 0xff ? a : b
#[inline]
fn ct_select(mask: u8, a: usize, b: usize) -> usize {
    let m = ((mask & 1) as usize).wrapping_neg();
    (a & m) | (b & !m)
}

#[inline]
fn wipe(buf: &mut Vec<u8>) {
    #[cfg(feature = "sec-zeroize")]
    buf.zeroize();
    #[cfg(not(feature = "sec-zeroize"))]
    buf.clear();
}

impl<H: Digest, R: Rand> OAEPEncrypt<H, R> {
    /// label: 和消息相关联的标签
    pub fn new(key: PublicKey, rng: R, label: &[u8]) -> Result<Self, CipherError> {
        let (klen, hlen) = (key.key_len(), <H as Digest>::output_size());
        if klen < (hlen << 1) + 2 {
            return Err(CipherError::ModulusTooShort {
                klen,
                min: (hlen << 1) + 2,
            });
        }

        Ok(Self {
            key,
            rng: RefCell::new(rng),
            hlen,
            label: label.to_vec(),
            lhash: H::digest(label).to_vec(),
            hasher: PhantomData,
        })
    }

    pub fn set_label(&mut self, label: &[u8]) {
        self.label.clear();
        self.label.extend_from_slice(label);
        self.lhash = H::digest(label).to_vec();
    }

    pub fn label(&self) -> &[u8] {
        self.label.as_slice()
    }

    pub fn key_len(&self) -> usize {
        self.key.key_len()
    }

    const fn hash_len(&self) -> usize {
        self.hlen
    }

    pub fn max_msg_len(&self) -> usize {
        self.key_len() - (self.hash_len() << 1) - 2
    }

    /// EME-OAEP encoding of `msg` with the given `seed`, returns `EM` of `key_len()` bytes
    fn encode(&self, msg: &[u8], seed: &[u8]) -> Result<Vec<u8>, CipherError> {
        let (klen, hlen) = (self.key_len(), self.hash_len());

        // em = 0x00 || seed || db
        let mut em = vec![0u8; klen];
        let (head, db) = em.split_at_mut(hlen + 1);
        let seed_mut = &mut head[1..];
        seed_mut.copy_from_slice(seed);

        // db = lhash || ps || 0x01 || M
        let dlen = db.len();
        db[..hlen].copy_from_slice(self.lhash.as_slice());
        db[dlen - msg.len() - 1] = 0x01;
        db[(dlen - msg.len())..].copy_from_slice(msg);

        // maskedDB = db ^ MGF(seed, k - hLen - 1);
        mgf1_xor::<H>(db, seed_mut)?;
        // maskedSeed = seed ^ MGF(maskedDB, hLen);
        mgf1_xor::<H>(seed_mut, db)?;

        Ok(em)
    }

    /// Encrypts one message of at most `max_msg_len()` bytes into `key_len()` bytes.
    pub fn encrypt_block(&self, msg: &[u8]) -> Result<Vec<u8>, CipherError> {
        if msg.len() > self.max_msg_len() {
            return Err(CipherError::MessageTooLong {
                len: msg.len(),
                max: self.max_msg_len(),
            });
        }

        let mut seed = vec![0u8; self.hash_len()];
        self.rng.borrow_mut().rand(seed.as_mut_slice());
        let em = self.encode(msg, seed.as_slice());
        wipe(&mut seed);
        let mut em = em?;

        let m = os2ip(em.as_slice());
        wipe(&mut em);
        let c = self.key.rsaep(&m)?;

        Ok(i2osp(&c, Some(self.key_len()))?)
    }

    fn encrypt_to<OW: Write>(&self, msg: &[u8], cipher: &mut OW) -> Result<usize, CipherError> {
        let c = self.encrypt_block(msg)?;
        cipher.write_all(c.as_slice())?;
        Ok(c.len())
    }

    /// 返回Encrypt(msg)加密后的字节长度
    /// `msg`读出的数据长度超过`mlen=max_msg_len()`时, 会按`mlen`分块加密;
    /// 空消息也加密为一个块, 加密后的数据是`clen=key_len()`的正整数倍;
    pub fn oaep_encrypt<IR: Read, OW: Write>(
        &self,
        msg: &mut IR,
        cipher: &mut OW,
    ) -> Result<usize, CipherError> {
        let mut data = Vec::with_capacity(1024);
        if let Err(e) = msg.read_to_end(&mut data) {
            wipe(&mut data);
            return Err(e.into());
        }

        let mlen = self.max_msg_len();
        let olen = if data.is_empty() {
            self.encrypt_to(&[], cipher)
        } else if mlen == 0 {
            Err(CipherError::MessageTooLong {
                len: data.len(),
                max: 0,
            })
        } else {
            data.chunks(mlen)
                .try_fold(0usize, |olen, block| -> Result<usize, CipherError> {
                    Ok(olen + self.encrypt_to(block, cipher)?)
                })
        };

        wipe(&mut data);
        olen
    }
}

impl<H: Digest, R: Rand> OAEPDecrypt<H, R> {
    pub fn new(key: PrivateKey, rng: R, label: &[u8]) -> Result<Self, CipherError> {
        key.is_valid()?;
        Self::new_uncheck(key, rng, label)
    }

    /// 不检查`key`的合法性;
    pub fn new_uncheck(key: PrivateKey, rng: R, label: &[u8]) -> Result<Self, CipherError> {
        let de = OAEPEncrypt::new(key.public_key().clone(), rng, label)?;

        Ok(Self { de, key })
    }

    pub fn from_oaep_encrypt(
        key: PrivateKey,
        oaep_encrypt: OAEPEncrypt<H, R>,
    ) -> Result<Self, CipherError> {
        if key.public_key() != &oaep_encrypt.key {
            Err(CipherError::InvalidPrivateKey(
                "rsa-oaep: encrypt public key not match to private key".to_string(),
            ))
        } else {
            Ok(Self {
                de: oaep_encrypt,
                key,
            })
        }
    }

    pub fn max_msg_len(&self) -> usize {
        self.de.max_msg_len()
    }

    pub fn key_len(&self) -> usize {
        self.de.key_len()
    }

    pub fn set_label(&mut self, label: &[u8]) {
        self.de.set_label(label)
    }

    pub fn encrypt_block(&self, msg: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.de.encrypt_block(msg)
    }

    pub fn oaep_encrypt<IR: Read, OW: Write>(
        &self,
        msg: &mut IR,
        cipher: &mut OW,
    ) -> Result<usize, CipherError> {
        self.de.oaep_encrypt(msg, cipher)
    }

    /// EME-OAEP decoding, `em` is `key_len()` bytes.
    ///
    /// Every check runs over the whole block and the outcome is evaluated once,
    /// so all failures look the same.
    fn decode(&self, em: &mut [u8]) -> Result<Vec<u8>, CipherError> {
        let hlen = self.de.hash_len();
        let (head, db) = em.split_at_mut(hlen + 1);
        let y = head[0];
        let seed = &mut head[1..];

        // seed = maskedSeed ^ MGF(maskedDB, hLen)
        // db = maskedDB ^ MGF(seed, k - hLen - 1)
        mgf1_xor::<H>(seed, db)?;
        mgf1_xor::<H>(db, seed)?;

        let mut bad = !ct_is_zero(y);
        for (&a, &b) in db.iter().zip(self.de.lhash.iter()) {
            bad |= !ct_eq(a, b);
        }

        // ps = 0x00..., followed by 0x01
        let (mut found, mut idx, mut invalid) = (0u8, 0usize, 0u8);
        for (i, &x) in db.iter().enumerate().skip(hlen) {
            let (is_zero, is_one) = (ct_is_zero(x), ct_eq(x, 0x01));
            idx = ct_select(!found & is_one, i, idx);
            invalid |= !found & !is_zero & !is_one;
            found |= is_one;
        }
        bad |= invalid | !found;

        if bad != 0 {
            return Err(CipherError::DecodingFailed);
        }

        Ok(db[(idx + 1)..].to_vec())
    }

    /// Decrypts one `key_len()` bytes block.
    pub fn decrypt_block(&self, cipher: &[u8]) -> Result<Vec<u8>, CipherError> {
        let klen = self.de.key_len();
        if cipher.len() != klen {
            return Err(CipherError::DecodingFailed);
        }

        let c = os2ip(cipher);
        let m = self
            .key
            .rsadp(&c)
            .map_err(|_| CipherError::DecodingFailed)?;
        let mut em = i2osp(&m, Some(klen)).map_err(|_| CipherError::DecodingFailed)?;

        let msg = self.decode(em.as_mut_slice());
        wipe(&mut em);

        msg
    }

    /// 密文数据会按`clen=key_len()`分块解密, 返回解密后的字节长度
    ///
    /// 密文为空或长度不是`clen`的整数倍时返回`DecodingFailed`
    pub fn oaep_decrypt<IR: Read, OW: Write>(
        &self,
        cipher: &mut IR,
        msg: &mut OW,
    ) -> Result<usize, CipherError> {
        let (mut data, mut olen) = (Vec::with_capacity(1024), 0);
        cipher.read_to_end(&mut data)?;

        let klen = self.key_len();
        if data.is_empty() || data.len() % klen != 0 {
            return Err(CipherError::DecodingFailed);
        }

        for block in data.chunks(klen) {
            let mut m = self.decrypt_block(block)?;
            let written = msg.write_all(m.as_slice());
            olen += m.len();
            wipe(&mut m);
            written?;
        }

        Ok(olen)
    }
}

impl<H: Digest, R: Rand> AsRef<OAEPEncrypt<H, R>> for OAEPDecrypt<H, R> {
    fn as_ref(&self) -> &OAEPEncrypt<H, R> {
        &self.de
    }
}

impl<H: Digest, R: Rand> AsRef<PublicKey> for OAEPEncrypt<H, R> {
    fn as_ref(&self) -> &PublicKey {
        &self.key
    }
}

impl<H: Digest, R: Rand> AsRef<PrivateKey> for OAEPDecrypt<H, R> {
    fn as_ref(&self) -> &PrivateKey {
        &self.key
    }
}

impl<H: Digest, R: Rand> From<OAEPDecrypt<H, R>> for OAEPEncrypt<H, R> {
    fn from(value: OAEPDecrypt<H, R>) -> Self {
        value.de
    }
}

impl<H: Digest, R: Rand> Encrypt for OAEPEncrypt<H, R> {
    fn encrypt(&self, mut plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        let _len = self.oaep_encrypt(&mut plaintext, ciphertext)?;
        Ok(())
    }
}

impl<H: Digest, R: Rand> Encrypt for OAEPDecrypt<H, R> {
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        self.de.encrypt(plaintext, ciphertext)
    }
}

impl<H: Digest, R: Rand> Decrypt for OAEPDecrypt<H, R> {
    fn decrypt(&self, mut ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        let _len = self.oaep_decrypt(&mut ciphertext, plaintext)?;
        Ok(())
    }
}
