use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use rsa_oaep::cmd::{
    Cmd, DecryptCmd, DemoCmd, EncryptCmd, IsPrimeCmd, KeygenCmd, PrimeCmd, RsaConfig,
};
use std::io::Read;
use std::path::PathBuf;

fn run(app: &ArgMatches, s: &str, m: &ArgMatches) -> anyhow::Result<()> {
    let config = RsaConfig::config_with_file(
        app.get_one::<PathBuf>("config")
            .and_then(|p| p.to_str()),
    )?;

    let mut pdata = Vec::with_capacity(1024);
    if app.get_flag("pipe") {
        let _len = std::io::stdin().lock().read_to_end(&mut pdata)?;
    }

    match s {
        KeygenCmd::NAME => KeygenCmd::new(config).run(m),
        PrimeCmd::NAME => PrimeCmd::new(config).run(m),
        IsPrimeCmd::NAME => IsPrimeCmd::new(config).run(m),
        EncryptCmd::NAME => EncryptCmd::new(config, pdata.as_slice()).run(m),
        DecryptCmd::NAME => DecryptCmd::new(config).run(m),
        DemoCmd::NAME => DemoCmd::new(config, pdata.as_slice()).run(m),
        name => anyhow::bail!("unsupport for {}", name),
    }
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("RSA_OAEP_VERSION_INFO");
    let app = Command::new("rsa-oaep")
        .version(version)
        .about("RSA key generation and RSAES-OAEP encryption")
        .arg(
            Arg::new("pipe")
                .long("pipe")
                .short('p')
                .action(ArgAction::SetTrue)
                .required(false)
                .help("read the message from stdin"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .action(ArgAction::Set)
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("to specify the config file path(json | json5)"),
        )
        .subcommand(KeygenCmd::cmd())
        .subcommand(PrimeCmd::cmd())
        .subcommand(IsPrimeCmd::cmd())
        .subcommand(EncryptCmd::cmd())
        .subcommand(DecryptCmd::cmd())
        .subcommand(DemoCmd::cmd())
        .get_matches();

    if let Some((s, m)) = app.subcommand() {
        if let Err(e) = run(&app, s, m) {
            log::error!("{e:#}");
            std::process::exit(1);
        }
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), version);
    }
}
