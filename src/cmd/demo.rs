use crate::cmd::crypto::{decrypt_message, encrypt_message};
use crate::cmd::{Cmd, KeygenCmd, RsaConfig};
use crate::error::RsaToolError;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

pub const DEMO_MESSAGE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub struct DemoCmd {
    config: &'static RsaConfig,
    pipe: Vec<u8>,
}

impl DemoCmd {
    pub fn new(config: &'static RsaConfig, pipe: &[u8]) -> Self {
        Self {
            config,
            pipe: pipe.to_vec(),
        }
    }

    /// keygen -> encrypt -> decrypt, returns the ciphertext
    pub fn round_trip(
        bits: usize,
        rounds: usize,
        label: &[u8],
        msg: &[u8],
    ) -> anyhow::Result<Vec<u8>> {
        let key = KeygenCmd::generate(bits, rounds)?;
        let cipher = encrypt_message(key.public_key().clone(), label, msg)?;
        log::info!(
            "encrypted {} message bytes into {} ciphertext bytes",
            msg.len(),
            cipher.len()
        );

        let plain = decrypt_message(key, label, cipher.as_slice())?;
        if plain.as_slice() != msg {
            return Err(RsaToolError::RoundTripMismatch.into());
        }

        Ok(cipher)
    }
}

impl Cmd for DemoCmd {
    const NAME: &'static str = "demo";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("generate a key, then encrypt and decrypt the message")
            .arg(
                Arg::new("msg")
                    .value_name("MESSAGE")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("the message, default `ABCDEFGHIJKLMNOPQRSTUVWXYZ`"),
            )
            .arg(
                Arg::new("bits")
                    .long("bits")
                    .short('b')
                    .action(ArgAction::Set)
                    .required(false)
                    .value_parser(value_parser!(usize))
                    .help("to specify the public key modulus bits length"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let msg = match m.get_one::<String>("msg") {
            Some(s) => s.as_bytes(),
            None if !self.pipe.is_empty() => self.pipe.as_slice(),
            None => DEMO_MESSAGE.as_bytes(),
        };
        let bits = m
            .get_one::<usize>("bits")
            .copied()
            .unwrap_or(self.config.modulus_bits);

        let cipher = Self::round_trip(
            bits,
            self.config.prime_test_rounds,
            self.config.label.as_bytes(),
            msg,
        )?;

        println!("message:    {}", String::from_utf8_lossy(msg));
        println!("ciphertext: {}", hex::encode(cipher));
        println!("round trip: ok");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DemoCmd, DEMO_MESSAGE};

    #[test]
    fn two_128_byte_primes() {
        let c = DemoCmd::round_trip(2048, 100, b"", DEMO_MESSAGE.as_bytes()).unwrap();
        assert_eq!(c.len(), 256);
    }

    #[test]
    fn long_message_with_label() {
        let msg = DEMO_MESSAGE.repeat(4);
        let c = DemoCmd::round_trip(1024, 20, b"demo", msg.as_bytes()).unwrap();
        // 104 bytes over 62-byte blocks
        assert_eq!(c.len(), 2 * 128);
    }
}
