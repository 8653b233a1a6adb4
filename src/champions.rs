use std::collections::HashMap;

use reqwest::Client;
use tracing::info;

use crate::shared::{
    error::ApiError,
    requests::{build_url, send_request},
    types::DataDragonChampions,
};

const DATA_DRAGON_HOST: &str = "https://ddragon.leagueoflegends.com";
const CHAMPION_LOCALE: &str = "ko_KR";

/// Champion key (as found in `championName`) to localized display name.
#[derive(Debug, Default, Clone)]
pub struct ChampionNames {
    names: HashMap<String, String>,
}

impl ChampionNames {
    pub fn new(names: HashMap<String, String>) -> Self {
        ChampionNames { names }
    }

    /// Loads the name table of the latest Data Dragon release.
    pub async fn fetch(client: &Client) -> Result<Self, ApiError> {
        let versions_url = build_url(DATA_DRAGON_HOST, &["api", "versions.json"])?;
        let versions: Vec<String> = send_request(client, client.get(versions_url)).await?;
        let latest = versions
            .first()
            .ok_or_else(|| ApiError::NotFound("data dragon version".to_string()))?;

        let champions_url = build_url(
            DATA_DRAGON_HOST,
            &["cdn", latest.as_str(), "data", CHAMPION_LOCALE, "champion.json"],
        )?;
        let champions: DataDragonChampions =
            send_request(client, client.get(champions_url)).await?;

        info!(
            "Loaded {} champion names from data dragon {}",
            champions.data.len(),
            latest
        );
        Ok(ChampionNames::new(
            champions
                .data
                .into_iter()
                .map(|(key, champion)| (key, champion.name))
                .collect(),
        ))
    }

    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.names.get(key).map(String::as_str).unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_champions_keep_their_key() {
        let names = ChampionNames::new(HashMap::from([(
            "MonkeyKing".to_string(),
            "오공".to_string(),
        )]));
        assert_eq!(names.display_name("MonkeyKing"), "오공");
        assert_eq!(names.display_name("Ahri"), "Ahri");
    }

    #[test]
    fn data_dragon_payload_decodes() {
        let payload = r#"{"type":"champion","data":{"Ahri":{"id":"Ahri","key":"103","name":"아리"}}}"#;
        let champions: DataDragonChampions =
            crate::shared::requests::decode("champion.json", payload).unwrap();
        assert_eq!(champions.data["Ahri"].name, "아리");
    }
}
