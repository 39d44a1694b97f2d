use crate::cmd::{parse_hex_bytes, parse_hex_number, required, Cmd, RsaConfig};
use crate::error::RsaToolError;
use cipher::rsa::{OAEPDecryptSha256, OAEPEncryptSha256, PrivateKey, PublicKey, PUBLIC_EXPONENT};
use cipher::DefaultRand;
use clap::{Arg, ArgAction, ArgMatches, Command};
use num_bigint::BigUint;
use std::io::Write;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

fn modulus_arg() -> Arg {
    Arg::new("modulus")
        .short('n')
        .long("modulus")
        .value_name("HEX")
        .action(ArgAction::Set)
        .required(true)
        .value_parser(parse_hex_number)
        .help("the public modulus `n` in hex")
}

fn label_arg() -> Arg {
    Arg::new("label")
        .long("label")
        .short('l')
        .action(ArgAction::Set)
        .required(false)
        .help("the label associated with the message")
}

fn label<'a>(m: &'a ArgMatches, config: &'a RsaConfig) -> &'a str {
    m.get_one::<String>("label")
        .map(|s| s.as_str())
        .unwrap_or(config.label.as_str())
}

/// OAEP-SHA256 encryption, `msg` longer than one block is split into `max_msg_len()` chunks
pub fn encrypt_message(pk: PublicKey, label: &[u8], mut msg: &[u8]) -> anyhow::Result<Vec<u8>> {
    let en = OAEPEncryptSha256::new(pk, DefaultRand::default(), label)?;
    log::debug!(
        "oaep: key length {} bytes, at most {} message bytes per block",
        en.key_len(),
        en.max_msg_len()
    );

    let mut cipher = Vec::with_capacity(en.key_len());
    let _len = en.oaep_encrypt(&mut msg, &mut cipher)?;
    Ok(cipher)
}

/// OAEP-SHA256 decryption with a bare `(n, e, d)` key
pub fn decrypt_message(key: PrivateKey, label: &[u8], mut cipher: &[u8]) -> anyhow::Result<Vec<u8>> {
    let de = OAEPDecryptSha256::new_uncheck(key, DefaultRand::default(), label)?;

    let mut msg = Vec::with_capacity(cipher.len());
    let _len = de.oaep_decrypt(&mut cipher, &mut msg)?;
    Ok(msg)
}

pub struct EncryptCmd {
    config: &'static RsaConfig,
    pipe: Vec<u8>,
}

impl EncryptCmd {
    pub fn new(config: &'static RsaConfig, pipe: &[u8]) -> Self {
        Self {
            config,
            pipe: pipe.to_vec(),
        }
    }
}

impl Cmd for EncryptCmd {
    const NAME: &'static str = "encrypt";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("RSAES-OAEP(SHA256) encrypt (PIPE | MESSAGE), print the ciphertext in hex")
            .arg(
                Arg::new("msg")
                    .value_name("MESSAGE")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("the message to encrypt"),
            )
            .arg(modulus_arg())
            .arg(
                Arg::new("exponent")
                    .short('e')
                    .long("exponent")
                    .value_name("HEX")
                    .action(ArgAction::Set)
                    .required(false)
                    .value_parser(parse_hex_number)
                    .help("the public exponent `e` in hex, default 0x10001"),
            )
            .arg(label_arg())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let n = required::<BigUint>(m, "modulus")?.clone();
        let e = m
            .get_one::<BigUint>("exponent")
            .cloned()
            .unwrap_or_else(|| BigUint::from(PUBLIC_EXPONENT));

        let msg = match m.get_one::<String>("msg") {
            Some(s) => s.as_bytes(),
            None if !self.pipe.is_empty() => self.pipe.as_slice(),
            None => return Err(RsaToolError::NoMessage.into()),
        };

        let cipher = encrypt_message(
            PublicKey::new_uncheck(n, e),
            label(m, self.config).as_bytes(),
            msg,
        )?;
        println!("{}", hex::encode(cipher));

        Ok(())
    }
}

pub struct DecryptCmd {
    config: &'static RsaConfig,
}

impl DecryptCmd {
    pub fn new(config: &'static RsaConfig) -> Self {
        Self { config }
    }
}

impl Cmd for DecryptCmd {
    const NAME: &'static str = "decrypt";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("RSAES-OAEP(SHA256) decrypt the hex ciphertext, write the message to stdout")
            .arg(
                Arg::new("cipher")
                    .value_name("CIPHERTEXT")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(parse_hex_bytes)
                    .help("the ciphertext in hex"),
            )
            .arg(modulus_arg())
            .arg(
                Arg::new("private")
                    .short('d')
                    .long("private")
                    .value_name("HEX")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(parse_hex_number)
                    .help("the private exponent `d` in hex"),
            )
            .arg(label_arg())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (n, d, cipher) = (
            required::<BigUint>(m, "modulus")?.clone(),
            required::<BigUint>(m, "private")?.clone(),
            required::<Vec<u8>>(m, "cipher")?,
        );

        let key = PrivateKey::new_uncheck(n, BigUint::from(PUBLIC_EXPONENT), d);
        let mut msg = decrypt_message(key, label(m, self.config).as_bytes(), cipher)?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(msg.as_slice())?;
        stdout.flush()?;

        #[cfg(feature = "sec-zeroize")]
        msg.zeroize();
        #[cfg(not(feature = "sec-zeroize"))]
        msg.clear();

        Ok(())
    }
}
