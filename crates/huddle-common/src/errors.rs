use std::path::PathBuf;

/// Failures while locating, reading or checking the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config file at {0}")]
    FileNotFound(PathBuf),

    #[error("cannot parse config: {0}")]
    ParseError(String),

    #[error("invalid config: {0}")]
    ValidationError(String),
}

/// Top-level error surfaced by the `huddle` binary.
#[derive(Debug, thiserror::Error)]
pub enum HuddleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A room session ended with an error; `room` names the room it was in.
    #[error("session in room {room:?} failed: {message}")]
    Session { room: String, message: String },
}

impl HuddleError {
    pub fn session(room: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Session {
            room: room.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/huddle/config.toml"));
        assert_eq!(err.to_string(), "no config file at /tmp/huddle/config.toml");
    }

    #[test]
    fn config_errors_pass_through_unchanged() {
        let err: HuddleError = ConfigError::ValidationError("media.encoder.frame_rate".into()).into();
        assert!(matches!(err, HuddleError::Config(ConfigError::ValidationError(_))));
        assert_eq!(err.to_string(), "invalid config: media.encoder.frame_rate");
    }

    #[test]
    fn session_error_carries_room() {
        let err = HuddleError::session("lobby", "join failed at login");
        assert_eq!(
            err.to_string(),
            "session in room \"lobby\" failed: join failed at login"
        );
    }
}
