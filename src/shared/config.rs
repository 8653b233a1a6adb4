use anyhow::{Context as _, Result};
use shuttle_runtime::SecretStore;

/// Credentials read once at startup. Every value is required.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub discord_guild_id: u64,
    pub riot_api_key: String,
    pub pubg_api_key: String,
}

impl Config {
    pub fn from_secrets(secret_store: &SecretStore) -> Result<Self> {
        Config::from_lookup(|key| secret_store.get(key))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("'{}' was not found", key))
        };

        let discord_guild_id = require("DISCORD_GUILD_ID")?;
        Ok(Config {
            discord_token: require("DISCORD_TOKEN")?,
            discord_guild_id: discord_guild_id
                .trim()
                .parse()
                .with_context(|| format!("'DISCORD_GUILD_ID' is not a snowflake: {}", discord_guild_id))?,
            riot_api_key: require("RIOT_API_KEY")?,
            pubg_api_key: require("PUBG_API_KEY")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn secrets(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn all_secrets_present() {
        let store = secrets(&[
            ("DISCORD_TOKEN", "token"),
            ("DISCORD_GUILD_ID", "123456789012345678"),
            ("RIOT_API_KEY", "RGAPI-key"),
            ("PUBG_API_KEY", "pubg-key"),
        ]);
        let config = Config::from_lookup(|key| store.get(key).cloned()).unwrap();
        assert_eq!(config.discord_guild_id, 123456789012345678);
        assert_eq!(config.riot_api_key, "RGAPI-key");
    }

    #[test]
    fn missing_secret_names_the_key() {
        let store = secrets(&[
            ("DISCORD_TOKEN", "token"),
            ("DISCORD_GUILD_ID", "1"),
            ("RIOT_API_KEY", "RGAPI-key"),
        ]);
        let err = Config::from_lookup(|key| store.get(key).cloned()).unwrap_err();
        assert_eq!(err.to_string(), "'PUBG_API_KEY' was not found");
    }

    #[test]
    fn blank_secrets_count_as_missing() {
        let store = secrets(&[("DISCORD_TOKEN", " "), ("DISCORD_GUILD_ID", "1")]);
        let err = Config::from_lookup(|key| store.get(key).cloned()).unwrap_err();
        assert_eq!(err.to_string(), "'DISCORD_TOKEN' was not found");
    }

    #[test]
    fn guild_id_must_be_numeric() {
        let store = secrets(&[
            ("DISCORD_TOKEN", "token"),
            ("DISCORD_GUILD_ID", "my-guild"),
            ("RIOT_API_KEY", "k"),
            ("PUBG_API_KEY", "k"),
        ]);
        assert!(Config::from_lookup(|key| store.get(key).cloned()).is_err());
    }
}
