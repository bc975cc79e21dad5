use thiserror::Error;

/// Why a theme lookup did not produce a usable theme.
///
/// The `Display` text is what the resolver exposes as its error string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeFetchError {
    #[error("Failed to load theme: {message}")]
    Transport { message: String },

    #[error("Failed to load theme: backend responded with HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to load theme: malformed theme payload ({reason})")]
    Malformed { reason: String },
}

impl ThemeFetchError {
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(reason: S) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for ThemeFetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}
