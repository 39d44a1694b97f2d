use thiserror::Error;
use utils::UtilsError;

#[derive(Debug, Error)]
pub enum CipherError {
    /// 代表元不在`[0, n)`之中
    #[error("rsa: representative out of range, it must be less than the modulus")]
    OutOfRange,

    #[error("rsa: message too long, `{len}` bytes exceeds the capacity of `{max}` bytes")]
    MessageTooLong { len: usize, max: usize },

    /// gcd(e, lambda(n)) != 1
    #[error("rsa: public exponent has no inverse modulo the totient")]
    NoInverse,

    /// 所有OAEP解码失败都归为这一个错误, 不区分原因
    #[error("rsa: decryption error")]
    DecodingFailed,

    #[error("rsa: modulus of `{klen}` bytes is too short, need at least `{min}` bytes")]
    ModulusTooShort { klen: usize, min: usize },

    #[error("rsa: invalid key size `{0}` bits")]
    InvalidKeySize(usize),

    #[error("mgf1: mask too long")]
    MaskTooLong,

    #[error("{0}")]
    InvalidPrivateKey(String),

    #[error(transparent)]
    Utils(#[from] UtilsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
