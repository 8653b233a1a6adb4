use std::fmt::Display;

/// Whether a player's average beats the reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Up,
    Down,
}

impl Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Marker::Up => write!(f, "↑"),
            Marker::Down => write!(f, "↓"),
        }
    }
}

/// Strictly greater is `Up`; a tie counts as `Down`.
pub fn compare<T: PartialOrd>(value: T, baseline: T) -> Marker {
    if value > baseline {
        Marker::Up
    } else {
        Marker::Down
    }
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `numerator / denominator`, or 0 when there is nothing to divide by.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Splits `name#tag`. Both halves must be non-empty and only one `#` is allowed.
pub fn parse_riot_id(riot_id: &str) -> Option<(&str, &str)> {
    let (name, tag) = riot_id.trim().split_once('#')?;
    let (name, tag) = (name.trim(), tag.trim());
    if name.is_empty() || tag.is_empty() || tag.contains('#') {
        return None;
    }
    Some((name, tag))
}
