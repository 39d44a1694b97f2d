use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RsaToolError {
    #[error("Invalid number `{0}`, expect a decimal or `0x` prefixed hex number")]
    InvalidNumber(String),

    #[error("Invalid hex string `{0}`")]
    InvalidHex(String),

    #[error("The argument `{0}` is required")]
    MissingArg(String),

    #[error("No message to process, give a MESSAGE or use `--pipe`")]
    NoMessage,

    #[error("The decrypted message doesn't match the original message")]
    RoundTripMismatch,
}
