use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serenity::async_trait;
use tracing::debug;

use super::{
    error::ApiError,
    types::{AccountDto, LeagueEntryDto, MatchDto, PubgMatchDto, PubgPlayersDto},
};

const RIOT_REGIONAL_HOST: &str = "https://asia.api.riotgames.com";
const RIOT_PLATFORM_HOST: &str = "https://kr.api.riotgames.com";
const PUBG_HOST: &str = "https://api.pubg.com/shards/steam";

/// Lookups against the Riot API needed by the match history command.
#[async_trait]
pub trait RiotApi: Send + Sync {
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, ApiError>;

    async fn league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntryDto>, ApiError>;

    async fn match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, ApiError>;

    async fn match_detail(&self, match_id: &str) -> Result<MatchDto, ApiError>;
}

/// Lookups against the PUBG API (steam shard).
#[async_trait]
pub trait PubgApi: Send + Sync {
    async fn player_by_name(&self, nickname: &str) -> Result<PubgPlayersDto, ApiError>;

    async fn match_detail(&self, match_id: &str) -> Result<PubgMatchDto, ApiError>;
}

pub async fn send_request<T: DeserializeOwned>(
    client: &Client,
    request: RequestBuilder,
) -> Result<T, ApiError> {
    let request = request.build()?;
    let url = request.url().to_string();

    let response = client.execute(request).await?;
    check_status(response.status(), &url)?;

    let body = response.text().await?;
    debug!("Request to {} successful", url);
    decode(&url, &body)
}

pub fn check_status(status: StatusCode, url: &str) -> Result<(), ApiError> {
    match status {
        status if status.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(url.to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(ApiError::Unauthorized(status.to_string()))
        }
        status => Err(ApiError::Transient(format!("{} returned {}", url, status))),
    }
}

pub fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::Malformed {
        url: url.to_string(),
        reason: err.to_string(),
    })
}

/// Joins `segments` onto `base`, percent-encoding each one.
pub fn build_url(base: &str, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = Url::parse(base).map_err(|err| ApiError::Transient(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::Transient(format!("{} cannot be a base url", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[derive(Clone)]
pub struct RiotClient {
    client: Client,
    api_key: String,
}

impl RiotClient {
    pub fn new(client: Client, api_key: &str) -> Self {
        RiotClient {
            client,
            api_key: api_key.to_owned(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let request = self.client.get(url).header("X-Riot-Token", &self.api_key);
        send_request(&self.client, request).await
    }
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, ApiError> {
        let url = build_url(
            RIOT_REGIONAL_HOST,
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
        )?;
        self.get(url).await
    }

    async fn league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntryDto>, ApiError> {
        let url = build_url(
            RIOT_PLATFORM_HOST,
            &["lol", "league", "v4", "entries", "by-puuid", puuid],
        )?;
        self.get(url).await
    }

    async fn match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, ApiError> {
        let mut url = build_url(
            RIOT_REGIONAL_HOST,
            &["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"],
        )?;
        url.query_pairs_mut()
            .append_pair("start", "0")
            .append_pair("count", &count.to_string());
        self.get(url).await
    }

    async fn match_detail(&self, match_id: &str) -> Result<MatchDto, ApiError> {
        let url = build_url(RIOT_REGIONAL_HOST, &["lol", "match", "v5", "matches", match_id])?;
        self.get(url).await
    }
}

#[derive(Clone)]
pub struct PubgClient {
    client: Client,
    api_key: String,
}

impl PubgClient {
    pub fn new(client: Client, api_key: &str) -> Self {
        PubgClient {
            client,
            api_key: api_key.to_owned(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let request = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/vnd.api+json");
        send_request(&self.client, request).await
    }
}

#[async_trait]
impl PubgApi for PubgClient {
    async fn player_by_name(&self, nickname: &str) -> Result<PubgPlayersDto, ApiError> {
        let mut url = build_url(PUBG_HOST, &["players"])?;
        url.query_pairs_mut()
            .append_pair("filter[playerNames]", nickname);
        self.get(url).await
    }

    async fn match_detail(&self, match_id: &str) -> Result<PubgMatchDto, ApiError> {
        let url = build_url(PUBG_HOST, &["matches", match_id])?;
        self.get(url).await
    }
}
