use std::sync::OnceLock;

use config::Config;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RsaConfig {
    // public modulus bits length
    pub modulus_bits: usize,

    // Miller-Rabin rounds for every prime candidate
    pub prime_test_rounds: usize,

    // OAEP label
    pub label: String,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            modulus_bits: 2048,
            prime_test_rounds: 100,
            label: String::default(),
        }
    }
}

impl RsaConfig {
    pub fn config() -> anyhow::Result<&'static Self> {
        Self::config_with_file(None)
    }

    /// 只有第一次调用时`f`生效, 之后返回缓存的配置
    pub fn config_with_file(f: Option<&str>) -> anyhow::Result<&'static Self> {
        static CONFIG: OnceLock<RsaConfig> = OnceLock::new();

        if let Some(c) = CONFIG.get() {
            return Ok(c);
        }

        let c = Self::load(f)?;
        Ok(CONFIG.get_or_init(|| c))
    }

    /// defaults < config file < environment variables `RSA_OAEP__*`
    pub fn load(f: Option<&str>) -> anyhow::Result<Self> {
        let default_config = Config::try_from(&RsaConfig::default())?;

        let mut config = Config::builder().add_source(default_config);

        if let Some(f) = f {
            config = config.add_source(config::File::with_name(f).required(false));
        }

        config = config.add_source(
            config::Environment::with_prefix("RSA_OAEP")
                .try_parsing(true)
                .separator("__"),
        );

        let mut rsa_config: RsaConfig = config.build()?.try_deserialize()?;

        rsa_config.prime_test_rounds = rsa_config.prime_test_rounds.max(1);
        rsa_config.modulus_bits = rsa_config.modulus_bits.max(16);

        log::trace!("{:?}", rsa_config);

        Ok(rsa_config)
    }
}

#[cfg(test)]
mod tests {
    use super::RsaConfig;
    use std::io::Write;

    #[test]
    fn defaults() {
        let c = RsaConfig::default();
        assert_eq!(c.modulus_bits, 2048);
        assert_eq!(c.prime_test_rounds, 100);
        assert!(c.label.is_empty());

        assert_eq!(RsaConfig::load(None).unwrap(), c);
    }

    #[test]
    fn missing_file_is_ignored() {
        let p = std::env::temp_dir().join("rsa-oaep-config-not-exist.json");
        let c = RsaConfig::load(p.to_str()).unwrap();
        assert_eq!(c, RsaConfig::default());
    }

    #[test]
    fn file_overrides_and_clamps() {
        let p = std::env::temp_dir().join(format!("rsa-oaep-config-{}.json", std::process::id()));
        {
            let mut f = std::fs::File::create(&p).unwrap();
            f.write_all(br#"{"modulus_bits": 8, "prime_test_rounds": 0, "label": "ctx"}"#)
                .unwrap();
        }

        let c = RsaConfig::load(p.to_str());
        std::fs::remove_file(&p).unwrap();

        let c = c.unwrap();
        assert_eq!(c.modulus_bits, 16);
        assert_eq!(c.prime_test_rounds, 1);
        assert_eq!(c.label, "ctx");
    }
}
