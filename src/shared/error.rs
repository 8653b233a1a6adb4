use thiserror::Error;

/// Failure of a single upstream call.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("request was not authorized ({0})")]
    Unauthorized(String),

    #[error("request failed: {0}")]
    Transient(String),

    #[error("unexpected response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transient(err.to_string())
    }
}

/// Everything a command handler can fail with. The `Display` text is what the
/// user sees.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("⚠️ Please use the `name#tag` format. (e.g. Hide on bush#KR1)")]
    InvalidRiotId,

    #[error("⚠️ Please provide a player nickname.")]
    EmptyNickname,

    #[error("❌ Player not found.")]
    PlayerNotFound,

    #[error("❗ No recent match data found.")]
    NoData,

    #[error("❌ Error: {0}")]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_are_wrapped_with_their_cause() {
        let err: CommandError = ApiError::Transient("connection reset".to_string()).into();
        assert_eq!(err.to_string(), "❌ Error: request failed: connection reset");
    }

    #[test]
    fn validation_messages_explain_the_expected_input() {
        assert!(CommandError::InvalidRiotId.to_string().contains("name#tag"));
        assert!(CommandError::EmptyNickname.to_string().contains("nickname"));
    }
}
