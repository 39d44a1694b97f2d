use crate::cmd::{parse_number, required, Cmd, RsaConfig};
use cipher::DefaultRand;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use num_bigint::BigUint;
use utils::BigUintExt;

fn test_arg() -> Arg {
    Arg::new("test")
        .long("test")
        .short('t')
        .action(ArgAction::Set)
        .required(false)
        .value_parser(value_parser!(usize))
        .help("to specify the probable prime test rounds")
}

fn test_rounds(m: &ArgMatches, config: &RsaConfig) -> usize {
    m.get_one::<usize>("test")
        .copied()
        .unwrap_or(config.prime_test_rounds)
        .max(1)
}

pub struct PrimeCmd {
    config: &'static RsaConfig,
}

impl PrimeCmd {
    pub fn new(config: &'static RsaConfig) -> Self {
        Self { config }
    }
}

impl Cmd for PrimeCmd {
    const NAME: &'static str = "prime";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("generate a probable prime")
            .arg(
                Arg::new("bits")
                    .value_name("BITS")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(value_parser!(usize))
                    .help("to specify the prime bits length"),
            )
            .arg(test_arg())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (bits, rounds) = (*required::<usize>(m, "bits")?, test_rounds(m, self.config));

        let mut rng = DefaultRand::default();
        let p = BigUintExt::<BigUint>::generate_prime(bits, rounds, &mut rng)?;
        println!("{p}");

        Ok(())
    }
}

pub struct IsPrimeCmd {
    config: &'static RsaConfig,
}

impl IsPrimeCmd {
    pub fn new(config: &'static RsaConfig) -> Self {
        Self { config }
    }

    pub fn is_prime(n: &BigUint, rounds: usize) -> bool {
        let mut rng = DefaultRand::default();
        BigUintExt(n).probably_prime_test(rounds, &mut rng)
    }
}

impl Cmd for IsPrimeCmd {
    const NAME: &'static str = "isprime";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("Miller-Rabin probable prime test")
            .arg(
                Arg::new("number")
                    .value_name("NUMBER")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(parse_number)
                    .help("decimal number, or hex number with `0x` prefix"),
            )
            .arg(test_arg())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let n = required::<BigUint>(m, "number")?;
        println!("{}", Self::is_prime(n, test_rounds(m, self.config)));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IsPrimeCmd, PrimeCmd};
    use crate::cmd::{parse_number, Cmd};

    #[test]
    fn is_prime() {
        for (s, expect) in [
            ("97", true),
            ("0x61", true),
            ("561", false),
            ("1", false),
            ("2", true),
            // 2^127 - 1
            ("0x7fffffffffffffffffffffffffffffff", true),
        ] {
            let n = parse_number(s).unwrap();
            assert_eq!(IsPrimeCmd::is_prime(&n, 40), expect, "case => {s}");
        }
    }

    #[test]
    fn args() {
        let m = IsPrimeCmd::cmd()
            .try_get_matches_from(["isprime", "0x65", "--test", "7"])
            .unwrap();
        assert_eq!(m.get_one::<usize>("test"), Some(&7));

        assert!(IsPrimeCmd::cmd()
            .try_get_matches_from(["isprime", "notanumber"])
            .is_err());
        assert!(PrimeCmd::cmd().try_get_matches_from(["prime"]).is_err());
    }
}
