use serenity::all::Colour;
use tracing::{info, instrument};

use crate::{
    shared::{
        error::{ApiError, CommandError},
        requests::PubgApi,
        types::DiscordOutput,
    },
    stats::{aggregate_session, SessionSummary},
};

pub const MATCH_COUNT: usize = 10;

#[instrument(skip(api))]
pub async fn handle_pubg_command<A: PubgApi + ?Sized>(
    nickname: &str,
    api: &A,
) -> Result<DiscordOutput, CommandError> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(CommandError::EmptyNickname);
    }

    let players = match api.player_by_name(nickname).await {
        Ok(players) => players,
        Err(ApiError::NotFound(_)) => return Err(CommandError::PlayerNotFound),
        Err(err) => return Err(err.into()),
    };
    let player = players
        .data
        .into_iter()
        .next()
        .ok_or(CommandError::PlayerNotFound)?;

    let match_ids = player.match_ids(MATCH_COUNT);
    let mut matches = Vec::with_capacity(match_ids.len());
    for match_id in &match_ids {
        matches.push(api.match_detail(match_id).await?);
    }

    let session = aggregate_session(&matches, &player.id);
    let summary = session.summary().ok_or(CommandError::NoData)?;
    info!(
        "Aggregated {} of {} PUBG matches for {}",
        summary.games,
        match_ids.len(),
        nickname
    );

    Ok(render_session(nickname, &summary))
}

pub fn render_session(nickname: &str, summary: &SessionSummary) -> DiscordOutput {
    let mut lines = Vec::new();
    if let Some((first, last)) = summary.date_range {
        lines.push(format!("📅 Dates: {} ~ {}", first, last));
    }
    lines.push(format!(
        "🔫 Kills: {:.2} | 💥 Damage: {:.1}",
        summary.avg_kills, summary.avg_damage
    ));
    lines.push(format!(
        "🧠 Knocks: {:.1} | ☠️ Team kills: {:.2}",
        summary.avg_dbnos, summary.avg_team_kills
    ));
    lines.push(format!(
        "🕒 Survived: {} | 🏁 Avg placement: #{:.1}",
        format_survival(summary.avg_survival_secs),
        summary.avg_placement
    ));
    lines.push(format!(
        "💊 Items\n• Heals: {:.1}\n• Boosts: {:.1}",
        summary.avg_heals, summary.avg_boosts
    ));
    lines.push(format!(
        "🚶 Distance: {:.2}km | 📏 Longest kill: {}m",
        summary.avg_distance_km, summary.longest_kill
    ));
    lines.push(format!("🎯 Headshot rate: {:.1}%", summary.headshot_rate));

    DiscordOutput::new(
        Colour::ORANGE,
        String::new(),
        vec![("📊 Average stats".to_string(), lines.join("\n"), false)],
        String::new(),
        format!("{}'s last {} PUBG matches", nickname, summary.games),
        String::new(),
    )
}

fn format_survival(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}
