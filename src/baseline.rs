use std::collections::HashMap;

use lazy_static::lazy_static;
use strum::{Display, EnumString};

lazy_static! {
    static ref QUEUE_LABELS: HashMap<i64, &'static str> = HashMap::from([
        (420, "Ranked Solo/Duo"),
        (430, "Normal (Summoner's Rift)"),
        (440, "Ranked Flex"),
        (450, "ARAM"),
        (1700, "Arena"),
        (1900, "URF"),
    ]);
}

/// Human readable label for a Riot queue id.
pub fn mode_label(queue_id: i64) -> String {
    match QUEUE_LABELS.get(&queue_id) {
        Some(label) => label.to_string(),
        None => format!("other mode ({})", queue_id),
    }
}

/// Ranked tiers that have reference averages. Anything else falls back to
/// [`Tier::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub kda: f64,
    pub cs: u64,
    pub gold: u64,
    pub damage: u64,
    pub vision: u64,
}

impl Tier {
    pub const DEFAULT: Tier = Tier::Silver;

    /// Parses a tier name as returned by league-v4, falling back to the default.
    pub fn from_api(tier: &str) -> Tier {
        tier.parse().unwrap_or(Tier::DEFAULT)
    }

    pub fn baseline(&self) -> Baseline {
        let (kda, cs, gold, damage, vision) = match self {
            Tier::Iron => (2.0, 120, 9000, 14000, 12),
            Tier::Bronze => (2.2, 130, 9800, 15000, 14),
            Tier::Silver => (2.5, 150, 11000, 18000, 20),
            Tier::Gold => (2.8, 160, 11500, 19000, 22),
            Tier::Platinum => (3.0, 170, 12000, 20000, 25),
            Tier::Diamond => (3.3, 180, 12500, 21000, 27),
        };
        Baseline {
            kda,
            cs,
            gold,
            damage,
            vision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_queues_have_labels() {
        assert_eq!(mode_label(420), "Ranked Solo/Duo");
        assert_eq!(mode_label(450), "ARAM");
    }

    #[test]
    fn unknown_queues_embed_the_raw_code() {
        assert_eq!(mode_label(999), "other mode (999)");
        assert_eq!(mode_label(-1), "other mode (-1)");
    }

    #[test]
    fn tiers_parse_from_api_names() {
        assert_eq!(Tier::from_api("GOLD"), Tier::Gold);
        assert_eq!(Tier::from_api("platinum"), Tier::Platinum);
        assert_eq!(Tier::from_api("MASTER"), Tier::Silver);
        assert_eq!(Tier::from_api(""), Tier::Silver);
        assert_eq!(Tier::Diamond.to_string(), "DIAMOND");
    }

    #[test]
    fn baselines_rise_with_tier() {
        assert_eq!(Tier::Silver.baseline().cs, 150);
        assert!(Tier::Diamond.baseline().kda > Tier::Iron.baseline().kda);
    }
}
