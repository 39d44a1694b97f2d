use crate::error::RsaToolError;
use clap::{ArgMatches, Command};
use num_bigint::BigUint;
use num_traits::Num;
use std::any::Any;

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

pub mod config;
pub use config::RsaConfig;

mod key;
pub use key::KeygenCmd;

mod prime;
pub use prime::{IsPrimeCmd, PrimeCmd};

mod crypto;
pub use crypto::{DecryptCmd, EncryptCmd};

mod demo;
pub use demo::DemoCmd;

/// decimal, or hex with the `0x` prefix
pub fn parse_number(s: &str) -> Result<BigUint, RsaToolError> {
    let s = s.trim();
    let (radix, digits) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(h) => (16, h),
        None => (10, s),
    };

    BigUint::from_str_radix(digits, radix).map_err(|_| RsaToolError::InvalidNumber(s.to_string()))
}

/// hex with or without the `0x` prefix
pub fn parse_hex_number(s: &str) -> Result<BigUint, RsaToolError> {
    let s = s.trim();
    let h = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

    BigUint::from_str_radix(h, 16).map_err(|_| RsaToolError::InvalidHex(s.to_string()))
}

pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, RsaToolError> {
    let s = s.trim();
    let h = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

    hex::decode(h).map_err(|_| RsaToolError::InvalidHex(s.to_string()))
}

fn required<'a, T: Any + Clone + Send + Sync + 'static>(
    m: &'a ArgMatches,
    id: &str,
) -> Result<&'a T, RsaToolError> {
    m.get_one::<T>(id)
        .ok_or_else(|| RsaToolError::MissingArg(id.to_string()))
}
