use crate::cmd::{Cmd, RsaConfig};
use cipher::rsa::PrivateKey;
use cipher::DefaultRand;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::time::Instant;

pub struct KeygenCmd {
    config: &'static RsaConfig,
}

impl KeygenCmd {
    pub fn new(config: &'static RsaConfig) -> Self {
        Self { config }
    }

    pub fn generate(bits: usize, rounds: usize) -> anyhow::Result<PrivateKey> {
        log::info!("generating a {bits}-bit rsa key, {rounds} Miller-Rabin rounds per prime");

        let now = Instant::now();
        let mut rng = DefaultRand::default();
        let key = PrivateKey::generate_key(bits, rounds, &mut rng)?;
        log::debug!("key generated in {:?}", now.elapsed());

        Ok(key)
    }
}

impl Cmd for KeygenCmd {
    const NAME: &'static str = "keygen";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("rsa key generate, print `n`, `e`, `d` in hex")
            .arg(
                Arg::new("bits")
                    .long("bits")
                    .short('b')
                    .action(ArgAction::Set)
                    .required(false)
                    .value_parser(value_parser!(usize))
                    .help("to specify the public key modulus bits length"),
            )
            .arg(
                Arg::new("test")
                    .long("test")
                    .short('t')
                    .action(ArgAction::Set)
                    .required(false)
                    .value_parser(value_parser!(usize))
                    .help("to specify the probable prime test rounds"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (bits, rounds) = (
            m.get_one::<usize>("bits")
                .copied()
                .unwrap_or(self.config.modulus_bits),
            m.get_one::<usize>("test")
                .copied()
                .unwrap_or(self.config.prime_test_rounds),
        );

        let key = Self::generate(bits, rounds.max(1))?;
        let pk = key.public_key();
        println!("n = {:x}", pk.modulus());
        println!("e = {:x}", pk.exponent());
        println!("d = {:x}", key.exponent());

        Ok(())
    }
}
