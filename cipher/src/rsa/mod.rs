//! RSA
//!
//! - 随机选择两个不相等的质数$p$和$q$, 则模数$n=p*q$. 模数的字节长度$k$满足: $2^{(k-1)*8}\le n \lt 2^{k*8}$;
//! - 公钥指数固定为$e=65537$, 要求$\gcd(e, \lambda(n)) = 1$;
//! - 私钥指数$d$满足: $d*e \equiv 1 \mod \lambda(n)$, 其中$\lambda(n)=\mathrm{lcm}(p-1, q-1)$ (Carmichael函数);
//!
//! 加密: $c = m^e \mod n$;
//!
//! 解密: $m = c^d \mod n$;
//!
//! 原理: 对任意$x$, $x^{k\lambda(n)+1} \equiv x \mod n$
//!
//! Private key operations use the plain exponent, there is no CRT path.

mod key;
pub use key::{totient, PrivateKey, PublicKey, PUBLIC_EXPONENT};

mod mgf;
pub use mgf::{mgf1, mgf1_xor};

mod oaep;
pub use oaep::{OAEPDecrypt, OAEPEncrypt};

/// OAEP with SHA-256, the hash used by default
pub type OAEPEncryptSha256<R> = OAEPEncrypt<sha2::Sha256, R>;
pub type OAEPDecryptSha256<R> = OAEPDecrypt<sha2::Sha256, R>;
