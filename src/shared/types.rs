use serde::Deserialize;
use serenity::all::{Colour, CreateEmbed, CreateEmbedFooter, EditInteractionResponse};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    #[serde(default)]
    pub puuid: String,
    pub game_name: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    pub match_id: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    /// Milliseconds since the unix epoch.
    pub game_creation: i64,
    /// Seconds.
    pub game_duration: u64,
    #[serde(default = "unknown_queue")]
    pub queue_id: i64,
    pub participants: Vec<ParticipantDto>,
}

fn unknown_queue() -> i64 {
    -1
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub team_id: u32,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    #[serde(default)]
    pub total_minions_killed: u32,
    #[serde(default)]
    pub neutral_minions_killed: u32,
    #[serde(default)]
    pub gold_earned: u32,
    #[serde(default)]
    pub total_damage_dealt_to_champions: u32,
    #[serde(default)]
    pub vision_score: u32,
}

#[derive(Debug, Deserialize)]
pub struct DataDragonChampions {
    pub data: std::collections::HashMap<String, DataDragonChampion>,
}

#[derive(Debug, Deserialize)]
pub struct DataDragonChampion {
    pub name: String,
}

// PUBG responses follow the JSON:API layout: `data` plus side-loaded `included`.

#[derive(Debug, Deserialize, Clone)]
pub struct PubgPlayersDto {
    #[serde(default)]
    pub data: Vec<PubgPlayerDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PubgPlayerDto {
    pub id: String,
    #[serde(default)]
    pub relationships: PubgRelationshipsDto,
}

impl PubgPlayerDto {
    pub fn match_ids(&self, count: usize) -> Vec<String> {
        self.relationships
            .matches
            .data
            .iter()
            .take(count)
            .map(|m| m.id.clone())
            .collect()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PubgRelationshipsDto {
    #[serde(default)]
    pub matches: PubgMatchRefsDto,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PubgMatchRefsDto {
    #[serde(default)]
    pub data: Vec<PubgMatchRefDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PubgMatchRefDto {
    pub id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PubgMatchDto {
    pub data: PubgMatchDataDto,
    #[serde(default)]
    pub included: Vec<PubgIncludedDto>,
}

impl PubgMatchDto {
    /// Stats of the participant with the given account id, if they played in this match.
    pub fn participant_stats(&self, player_id: &str) -> Option<&PubgParticipantStatsDto> {
        self.included
            .iter()
            .filter(|entry| entry.kind == "participant")
            .filter_map(|entry| entry.attributes.as_ref()?.stats.as_ref())
            .find(|stats| stats.player_id == player_id)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PubgMatchDataDto {
    pub id: String,
    pub attributes: PubgMatchAttributesDto,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PubgMatchAttributesDto {
    /// RFC 3339, e.g. `2024-05-01T12:34:56Z`.
    pub created_at: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PubgIncludedDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Option<PubgIncludedAttributesDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PubgIncludedAttributesDto {
    pub stats: Option<PubgParticipantStatsDto>,
}

// Rosters also carry a `stats` object with a different shape, hence the defaults.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PubgParticipantStatsDto {
    pub player_id: String,
    pub kills: u32,
    pub damage_dealt: f64,
    pub time_survived: f64,
    pub team_kills: u32,
    #[serde(rename = "DBNOs")]
    pub dbnos: u32,
    pub win_place: u32,
    pub walk_distance: f64,
    pub ride_distance: f64,
    pub swim_distance: f64,
    pub headshot_kills: u32,
    pub boosts: u32,
    pub heals: u32,
    pub longest_kill: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscordOutput {
    pub color: Colour,
    pub description: String,
    pub fields: Vec<(String, String, bool)>,
    pub footer: String,
    pub title: String,
    pub content: String,
}

impl DiscordOutput {
    pub fn new(
        color: Colour,
        description: String,
        fields: Vec<(String, String, bool)>,
        footer: String,
        title: String,
        content: String,
    ) -> Self {
        DiscordOutput {
            color,
            description,
            fields,
            footer,
            title,
            content,
        }
    }

    /// A plain message without an embed.
    pub fn text(content: impl Into<String>) -> Self {
        DiscordOutput::new(
            Colour::RED,
            String::new(),
            vec![],
            String::new(),
            String::new(),
            content.into(),
        )
    }

    pub fn has_embed(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn into_edit_response(self) -> EditInteractionResponse {
        let builder = EditInteractionResponse::new().content(self.content.as_str());
        if !self.has_embed() {
            return builder;
        }

        let mut embed = CreateEmbed::new()
            .title(self.title)
            .color(self.color)
            .fields(self.fields);
        // Discord rejects empty description and footer text.
        if !self.description.is_empty() {
            embed = embed.description(self.description);
        }
        if !self.footer.is_empty() {
            embed = embed.footer(CreateEmbedFooter::new(self.footer));
        }
        builder.embed(embed)
    }
}
