use serenity::all::Colour;
use tracing::{info, instrument, warn};

use crate::{
    baseline::Tier,
    champions::ChampionNames,
    shared::{
        error::{ApiError, CommandError},
        requests::RiotApi,
        types::DiscordOutput,
        util::{compare, parse_riot_id},
    },
    stats::{aggregate_matches, ChampionTally, ModeBreakdown, ModeSummary},
};

pub const MATCH_COUNT: usize = 10;
const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

#[instrument(skip(api, champions))]
pub async fn handle_matches_command<A: RiotApi + ?Sized>(
    riot_id: &str,
    api: &A,
    champions: &ChampionNames,
) -> Result<DiscordOutput, CommandError> {
    let (game_name, tag_line) = parse_riot_id(riot_id).ok_or(CommandError::InvalidRiotId)?;

    let account = match api.account_by_riot_id(game_name, tag_line).await {
        Ok(account) => account,
        Err(ApiError::NotFound(_)) => return Err(CommandError::PlayerNotFound),
        Err(err) => return Err(err.into()),
    };
    if account.puuid.is_empty() {
        return Err(CommandError::InvalidRiotId);
    }
    let player_name = account.game_name.as_deref().unwrap_or(game_name);

    let tier = lookup_tier(api, &account.puuid).await;

    let match_ids = api.match_ids(&account.puuid, MATCH_COUNT).await?;
    let mut matches = Vec::with_capacity(match_ids.len());
    for match_id in &match_ids {
        matches.push(api.match_detail(match_id).await?);
    }

    let breakdown = aggregate_matches(&matches, &account.puuid, champions);
    if breakdown.is_empty() {
        return Err(CommandError::NoData);
    }
    info!(
        "Aggregated {} of {} matches for {}",
        breakdown.total_games(),
        match_ids.len(),
        player_name
    );

    Ok(render_breakdown(player_name, tier, match_ids.len(), &breakdown))
}

/// Solo queue tier of the player. Any failure falls back to the default tier.
async fn lookup_tier<A: RiotApi + ?Sized>(api: &A, puuid: &str) -> Tier {
    match api.league_entries(puuid).await {
        Ok(entries) => entries
            .iter()
            .find(|entry| entry.queue_type == SOLO_QUEUE)
            .map(|entry| Tier::from_api(&entry.tier))
            .unwrap_or(Tier::DEFAULT),
        Err(err) => {
            warn!("Tier lookup failed, comparing against {}: {}", Tier::DEFAULT, err);
            Tier::DEFAULT
        }
    }
}

/// `match_count` is the number of match ids fetched, including matches the
/// player could not be found in.
pub fn render_breakdown(
    player_name: &str,
    tier: Tier,
    match_count: usize,
    breakdown: &ModeBreakdown,
) -> DiscordOutput {
    let fields = breakdown
        .modes()
        .iter()
        .filter_map(|mode| {
            let summary = mode.summary()?;
            Some((
                format!("🕹️ {} ({} games)", mode.label, mode.count),
                mode_field_value(&summary, tier),
                false,
            ))
        })
        .collect();

    DiscordOutput::new(
        if tier == Tier::Gold {
            Colour::GOLD
        } else {
            Colour::BLUE
        },
        format!("(compared against {} averages)", tier),
        fields,
        String::new(),
        format!("{}'s last {} matches", player_name, match_count),
        String::new(),
    )
}

fn mode_field_value(summary: &ModeSummary, tier: Tier) -> String {
    let baseline = tier.baseline();
    let mut lines = Vec::new();

    if let Some((first, last)) = summary.date_range {
        lines.push(format!("📅 Dates: {} ~ {}", first, last));
    }
    lines.push(format!(
        "📊 KDA: {:.1}/{:.1}/{:.1} (ratio: {:.2}) {} (avg: {:.1})",
        summary.avg_kills,
        summary.avg_deaths,
        summary.avg_assists,
        summary.kda_ratio,
        compare(summary.kda_ratio, baseline.kda),
        baseline.kda
    ));
    lines.push(format!(
        "📈 CS: {} {} (avg: {})",
        summary.avg_cs,
        compare(summary.avg_cs, baseline.cs),
        baseline.cs
    ));
    lines.push(format!(
        "💰 Gold: {} {} (avg: {})",
        summary.avg_gold,
        compare(summary.avg_gold, baseline.gold),
        baseline.gold
    ));
    lines.push(format!(
        "🗡️ Damage: {} {} (avg: {}) · {:.1}% of team",
        summary.avg_damage,
        compare(summary.avg_damage, baseline.damage),
        baseline.damage,
        summary.damage_share
    ));
    lines.push(format!(
        "👁️ Vision: {} {} (avg: {})",
        summary.avg_vision,
        compare(summary.avg_vision, baseline.vision),
        baseline.vision
    ));
    lines.push(format!("⏱️ Game length: {} min", summary.avg_minutes));
    lines.push(format!("🟢 Win rate: {:.1}%", summary.win_rate));
    lines.push(format!(
        "🎯 Champions:\n{}",
        champion_lines(&summary.top_champions)
    ));

    lines.join("\n")
}

fn champion_lines(champions: &[(String, ChampionTally)]) -> String {
    if champions.is_empty() {
        return "None".to_string();
    }
    champions
        .iter()
        .map(|(name, tally)| {
            format!(
                "{}: {}G {}W {}L ({}%)",
                name,
                tally.count,
                tally.wins,
                tally.losses(),
                tally.win_percent()
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}
