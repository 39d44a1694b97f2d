use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UtilsError {
    /// 整数无法用`len`字节表示
    #[error("integer too large to be encoded in `{len}` bytes")]
    IntegerTooLarge { len: usize },

    #[error("prime size must at least 2-bits, got `{0}`")]
    InvalidPrimeBits(usize),
}
