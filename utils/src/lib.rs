mod error;
pub use error::UtilsError;

mod biguint_ext;
pub use biguint_ext::BigUintExt;

mod euclid;
pub use euclid::ExtendedGcd;

pub mod octet;
pub use octet::{byte_len, i2osp, os2ip};
