//! Folding fetched matches into per-mode (League) and per-session (PUBG) averages.
//!
//! Sums are accumulated while folding; every average and rate is derived once
//! from the finished sums in `summary`. Counts, gold, damage, vision and
//! minutes are floored, rates are rounded.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::{
    baseline::mode_label,
    champions::ChampionNames,
    shared::{
        types::{MatchDto, ParticipantDto, PubgMatchDto, PubgParticipantStatsDto},
        util::{ratio, round_to},
    },
};

/// Number of champions listed per mode.
pub const TOP_CHAMPIONS: usize = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChampionTally {
    pub count: u32,
    pub wins: u32,
}

impl ChampionTally {
    pub fn losses(&self) -> u32 {
        self.count - self.wins
    }

    /// Truncated, not rounded.
    pub fn win_percent(&self) -> u32 {
        if self.count == 0 {
            0
        } else {
            self.wins * 100 / self.count
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModeStats {
    pub label: String,
    pub kills: u64,
    pub deaths: u64,
    pub assists: u64,
    pub cs: u64,
    pub gold: u64,
    pub damage: u64,
    pub team_damage: u64,
    pub vision: u64,
    pub duration_secs: u64,
    pub count: u32,
    pub wins: u32,
    /// In order of first appearance.
    pub champions: Vec<(String, ChampionTally)>,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModeSummary {
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub kda_ratio: f64,
    pub avg_cs: u64,
    pub avg_gold: u64,
    pub avg_damage: u64,
    pub avg_vision: u64,
    pub avg_minutes: u64,
    pub damage_share: f64,
    pub win_rate: f64,
    pub top_champions: Vec<(String, ChampionTally)>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl ModeStats {
    pub fn new(label: String) -> Self {
        ModeStats {
            label,
            kills: 0,
            deaths: 0,
            assists: 0,
            cs: 0,
            gold: 0,
            damage: 0,
            team_damage: 0,
            vision: 0,
            duration_secs: 0,
            count: 0,
            wins: 0,
            champions: Vec::new(),
            dates: Vec::new(),
        }
    }

    pub fn add(
        &mut self,
        player: &ParticipantDto,
        champion: &str,
        team_damage: u64,
        duration_secs: u64,
        date: Option<NaiveDate>,
    ) {
        self.kills += u64::from(player.kills);
        self.deaths += u64::from(player.deaths);
        self.assists += u64::from(player.assists);
        self.cs += u64::from(player.total_minions_killed) + u64::from(player.neutral_minions_killed);
        self.gold += u64::from(player.gold_earned);
        self.damage += u64::from(player.total_damage_dealt_to_champions);
        self.team_damage += team_damage;
        self.vision += u64::from(player.vision_score);
        self.duration_secs += duration_secs;
        self.count += 1;
        if player.win {
            self.wins += 1;
        }

        let index = match self.champions.iter().position(|(name, _)| name == champion) {
            Some(index) => index,
            None => {
                self.champions
                    .push((champion.to_string(), ChampionTally::default()));
                self.champions.len() - 1
            }
        };
        let tally = &mut self.champions[index].1;
        tally.count += 1;
        if player.win {
            tally.wins += 1;
        }

        if let Some(date) = date {
            self.dates.push(date);
        }
    }

    /// `None` for a mode that never had a game folded into it.
    pub fn summary(&self) -> Option<ModeSummary> {
        if self.count == 0 {
            return None;
        }
        let count = u64::from(self.count);
        let games = f64::from(self.count);

        let mut top_champions = self.champions.clone();
        top_champions.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        top_champions.truncate(TOP_CHAMPIONS);

        Some(ModeSummary {
            avg_kills: self.kills as f64 / games,
            avg_deaths: self.deaths as f64 / games,
            avg_assists: self.assists as f64 / games,
            kda_ratio: round_to(
                (self.kills + self.assists) as f64 / self.deaths.max(1) as f64,
                2,
            ),
            avg_cs: self.cs / count,
            avg_gold: self.gold / count,
            avg_damage: self.damage / count,
            avg_vision: self.vision / count,
            avg_minutes: self.duration_secs / count / 60,
            damage_share: round_to(
                ratio(self.damage as f64, self.team_damage as f64) * 100.0,
                1,
            ),
            win_rate: round_to(f64::from(self.wins) / games * 100.0, 1),
            top_champions,
            date_range: date_range(&self.dates),
        })
    }
}

/// Mode buckets in the order their first game was seen.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ModeBreakdown {
    modes: Vec<ModeStats>,
}

impl ModeBreakdown {
    pub fn entry(&mut self, label: String) -> &mut ModeStats {
        let index = match self.modes.iter().position(|mode| mode.label == label) {
            Some(index) => index,
            None => {
                self.modes.push(ModeStats::new(label));
                self.modes.len() - 1
            }
        };
        &mut self.modes[index]
    }

    pub fn modes(&self) -> &[ModeStats] {
        &self.modes
    }

    pub fn total_games(&self) -> u32 {
        self.modes.iter().map(|mode| mode.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_games() == 0
    }
}

/// Folds League matches into per-mode buckets for the player with `puuid`.
/// Matches the player is not part of are skipped.
pub fn aggregate_matches(
    matches: &[MatchDto],
    puuid: &str,
    champions: &ChampionNames,
) -> ModeBreakdown {
    let mut breakdown = ModeBreakdown::default();

    for match_dto in matches {
        let info = &match_dto.info;
        let Some(player) = info.participants.iter().find(|p| p.puuid == puuid) else {
            debug!("{} does not include the player, skipping", match_dto.metadata.match_id);
            continue;
        };

        let team_damage = info
            .participants
            .iter()
            .filter(|p| p.team_id == player.team_id)
            .map(|p| u64::from(p.total_damage_dealt_to_champions))
            .sum();
        let date = DateTime::<Utc>::from_timestamp_millis(info.game_creation)
            .map(|created| created.date_naive());

        breakdown.entry(mode_label(info.queue_id)).add(
            player,
            champions.display_name(&player.champion_name),
            team_damage,
            info.game_duration,
            date,
        );
    }

    breakdown
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionStats {
    pub games: u32,
    pub kills: u64,
    pub damage: f64,
    pub time_survived: f64,
    pub team_kills: u64,
    pub dbnos: u64,
    pub win_place: u64,
    pub distance: f64,
    pub headshot_kills: u64,
    pub boosts: u64,
    pub heals: u64,
    pub longest_kill: f64,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub games: u32,
    pub avg_kills: f64,
    pub avg_damage: f64,
    pub avg_survival_secs: u64,
    pub avg_team_kills: f64,
    pub avg_placement: f64,
    pub avg_dbnos: f64,
    pub avg_distance_km: f64,
    pub headshot_rate: f64,
    pub avg_boosts: f64,
    pub avg_heals: f64,
    pub longest_kill: u64,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl SessionStats {
    pub fn add(&mut self, stats: &PubgParticipantStatsDto, date: Option<NaiveDate>) {
        self.games += 1;
        self.kills += u64::from(stats.kills);
        self.damage += stats.damage_dealt;
        self.time_survived += stats.time_survived;
        self.team_kills += u64::from(stats.team_kills);
        self.dbnos += u64::from(stats.dbnos);
        self.win_place += u64::from(stats.win_place);
        self.distance += stats.walk_distance + stats.ride_distance + stats.swim_distance;
        self.headshot_kills += u64::from(stats.headshot_kills);
        self.boosts += u64::from(stats.boosts);
        self.heals += u64::from(stats.heals);
        self.longest_kill = self.longest_kill.max(stats.longest_kill);
        if let Some(date) = date {
            self.dates.push(date);
        }
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        if self.games == 0 {
            return None;
        }
        let games = f64::from(self.games);
        let per_game = |total: f64, places: i32| round_to(total / games, places);

        Some(SessionSummary {
            games: self.games,
            avg_kills: per_game(self.kills as f64, 2),
            avg_damage: per_game(self.damage, 1),
            avg_survival_secs: (self.time_survived / games) as u64,
            avg_team_kills: per_game(self.team_kills as f64, 2),
            avg_placement: per_game(self.win_place as f64, 1),
            avg_dbnos: per_game(self.dbnos as f64, 1),
            avg_distance_km: round_to(self.distance / games / 1000.0, 2),
            headshot_rate: round_to(
                ratio(self.headshot_kills as f64, self.kills as f64) * 100.0,
                1,
            ),
            avg_boosts: per_game(self.boosts as f64, 1),
            avg_heals: per_game(self.heals as f64, 1),
            longest_kill: self.longest_kill as u64,
            date_range: date_range(&self.dates),
        })
    }
}

/// Folds PUBG matches for the account `player_id`; matches without them are skipped.
pub fn aggregate_session(matches: &[PubgMatchDto], player_id: &str) -> SessionStats {
    let mut session = SessionStats::default();

    for match_dto in matches {
        let Some(stats) = match_dto.participant_stats(player_id) else {
            debug!("{} does not include the player, skipping", match_dto.data.id);
            continue;
        };
        let date = DateTime::parse_from_rfc3339(&match_dto.data.attributes.created_at)
            .ok()
            .map(|created| created.date_naive());
        session.add(stats, date);
    }

    session
}

fn date_range(dates: &[NaiveDate]) -> Option<(NaiveDate, NaiveDate)> {
    let first = dates.iter().min()?;
    let last = dates.iter().max()?;
    Some((*first, *last))
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{fixtures::*, *};

    fn names() -> ChampionNames {
        ChampionNames::new(HashMap::from([("MonkeyKing".to_string(), "Wukong".to_string())]))
    }

    #[test]
    fn ten_solo_games_average_out() {
        let kdas = [
            (3, 2, 1),
            (5, 1, 0),
            (2, 3, 2),
            (4, 2, 1),
            (1, 4, 0),
            (3, 2, 2),
            (6, 1, 1),
            (2, 2, 1),
            (3, 1, 1),
            (1, 2, 1),
        ];
        let matches: Vec<MatchDto> = kdas
            .iter()
            .enumerate()
            .map(|(i, kda)| solo_match(&format!("KR_{}", i), "Ahri", *kda, i % 2 == 0))
            .collect();

        let breakdown = aggregate_matches(&matches, PUUID, &names());
        assert_eq!(breakdown.modes().len(), 1);

        let solo = &breakdown.modes()[0];
        assert_eq!(solo.label, "Ranked Solo/Duo");
        assert_eq!((solo.kills, solo.deaths, solo.assists), (30, 20, 10));
        assert_eq!(solo.count, 10);
        assert_eq!(solo.wins, 5);

        let summary = solo.summary().unwrap();
        assert_eq!(summary.kda_ratio, 2.0);
        assert_eq!(summary.avg_kills, 3.0);
        assert_eq!(summary.avg_cs, 152);
        assert_eq!(summary.avg_minutes, 30);
        assert_eq!(summary.win_rate, 50.0);
    }

    #[test]
    fn absent_player_yields_no_modes() {
        let matches = vec![solo_match("KR_1", "Ahri", (1, 1, 1), true)];
        let breakdown = aggregate_matches(&matches, "somebody-else", &names());
        assert!(breakdown.is_empty());
        assert!(breakdown.modes().is_empty());
    }

    #[test]
    fn deathless_kda_is_kills_plus_assists() {
        let matches = vec![solo_match("KR_1", "Ahri", (7, 0, 4), true)];
        let summary = aggregate_matches(&matches, PUUID, &names()).modes()[0]
            .summary()
            .unwrap();
        assert_eq!(summary.kda_ratio, 11.0);
    }

    #[test]
    fn modes_keep_first_seen_order_and_counts_add_up() {
        let matches = vec![
            lol_match("1", 450, 1_714_500_000_000, vec![participant(PUUID, "Ahri", 100, (1, 1, 1), true)]),
            lol_match("2", 999, 1_714_600_000_000, vec![participant(PUUID, "Ahri", 100, (1, 1, 1), true)]),
            lol_match("3", 450, 1_714_700_000_000, vec![participant(PUUID, "Ahri", 100, (1, 1, 1), false)]),
            lol_match("4", 420, 1_714_800_000_000, vec![participant("other", "Ahri", 100, (1, 1, 1), false)]),
        ];
        let breakdown = aggregate_matches(&matches, PUUID, &names());

        let labels: Vec<&str> = breakdown.modes().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["ARAM", "other mode (999)"]);
        assert_eq!(breakdown.modes()[0].count, 2);
        assert_eq!(breakdown.modes()[0].wins, 1);
        assert_eq!(breakdown.total_games(), 3);
    }

    #[test]
    fn date_range_spans_first_and_last_game() {
        let matches = vec![
            lol_match("1", 420, 1_714_800_000_000, vec![participant(PUUID, "Ahri", 100, (1, 1, 1), true)]),
            lol_match("2", 420, 1_714_500_000_000, vec![participant(PUUID, "Ahri", 100, (1, 1, 1), true)]),
        ];
        let summary = aggregate_matches(&matches, PUUID, &names()).modes()[0]
            .summary()
            .unwrap();
        let (first, last) = summary.date_range.unwrap();
        assert_eq!(first.to_string(), "2024-04-30");
        assert_eq!(last.to_string(), "2024-05-04");
    }

    #[test]
    fn top_champions_are_sorted_stably_and_capped() {
        let picks = ["Ahri", "Zed", "Lux", "Zed", "Ezreal", "Jinx", "Annie", "MonkeyKing", "Lux", "Zed"];
        let matches: Vec<MatchDto> = picks
            .iter()
            .enumerate()
            .map(|(i, champion)| solo_match(&i.to_string(), champion, (1, 1, 1), *champion == "Zed"))
            .collect();
        let summary = aggregate_matches(&matches, PUUID, &names()).modes()[0]
            .summary()
            .unwrap();

        let top: Vec<(&str, u32, u32)> = summary
            .top_champions
            .iter()
            .map(|(name, tally)| (name.as_str(), tally.count, tally.wins))
            .collect();
        assert_eq!(
            top,
            vec![("Zed", 3, 3), ("Lux", 2, 0), ("Ahri", 1, 0), ("Ezreal", 1, 0), ("Jinx", 1, 0)]
        );
    }

    #[test]
    fn champion_keys_are_localized() {
        let matches = vec![solo_match("KR_1", "MonkeyKing", (1, 1, 1), true)];
        let breakdown = aggregate_matches(&matches, PUUID, &names());
        assert_eq!(breakdown.modes()[0].champions[0].0, "Wukong");
    }

    #[test]
    fn damage_share_uses_own_team_only() {
        let matches = vec![solo_match("KR_1", "Ahri", (1, 1, 1), true)];
        let summary = aggregate_matches(&matches, PUUID, &names()).modes()[0]
            .summary()
            .unwrap();
        assert_eq!(summary.damage_share, 50.0);
    }

    #[test]
    fn win_rate_stays_in_range() {
        for wins in 0..=3u32 {
            let mut mode = ModeStats::new("m".to_string());
            mode.count = 3;
            mode.wins = wins;
            let win_rate = mode.summary().unwrap().win_rate;
            assert!((0.0..=100.0).contains(&win_rate));
        }
        assert!(ModeStats::new("empty".to_string()).summary().is_none());
    }

    #[test]
    fn champion_win_percent_truncates() {
        let tally = ChampionTally { count: 3, wins: 2 };
        assert_eq!(tally.win_percent(), 66);
        assert_eq!(tally.losses(), 1);
        assert_eq!(ChampionTally::default().win_percent(), 0);
    }

    #[test]
    fn pubg_session_averages() {
        let matches = vec![
            pubg_match("m1", "2024-05-01T10:00:00Z", Some(pubg_stats(4, 1))),
            pubg_match("m2", "2024-05-03T22:00:00Z", Some(pubg_stats(2, 2))),
            pubg_match("m3", "2024-05-02T10:00:00Z", None),
        ];
        let session = aggregate_session(&matches, PUBG_ID);
        assert_eq!(session.games, 2);

        let summary = session.summary().unwrap();
        assert_eq!(summary.avg_kills, 3.0);
        assert_eq!(summary.avg_damage, 250.5);
        assert_eq!(summary.avg_survival_secs, 1234);
        assert_eq!(summary.avg_distance_km, 3.7);
        assert_eq!(summary.headshot_rate, 50.0);
        assert_eq!(summary.longest_kill, 187);
        let (first, last) = summary.date_range.unwrap();
        assert_eq!((first.to_string(), last.to_string()), ("2024-05-01".to_string(), "2024-05-03".to_string()));
    }

    #[test]
    fn headshot_rate_is_zero_without_kills() {
        let matches = vec![pubg_match("m1", "2024-05-01T10:00:00Z", Some(pubg_stats(0, 0)))];
        let summary = aggregate_session(&matches, PUBG_ID).summary().unwrap();
        assert_eq!(summary.headshot_rate, 0.0);
        assert_eq!(summary.avg_kills, 0.0);
    }

    #[test]
    fn pubg_player_missing_everywhere_is_empty() {
        let matches = vec![pubg_match("m1", "2024-05-01T10:00:00Z", None)];
        let session = aggregate_session(&matches, PUBG_ID);
        assert_eq!(session.games, 0);
        assert!(session.summary().is_none());
    }
}
