use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchipelagoError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Connection error: {0}")]
    Connection(Box<reqwest::Error>),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("ArchipelagoError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for ArchipelagoError {
    fn from(error: std::io::Error) -> Self {
        ArchipelagoError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for ArchipelagoError {
    fn from(error: reqwest::Error) -> Self {
        ArchipelagoError::Connection(Box::new(error))
    }
}

impl ArchipelagoError {
    /// True when the request never reached the server (DNS, refused socket, timeout).
    pub fn is_connection(&self) -> bool {
        matches!(self, ArchipelagoError::Connection(_))
    }

    /// Message suitable for a snackbar. Connection failures get the
    /// troubleshooting text instead of the raw reqwest chain.
    pub fn user_message(&self) -> String {
        match self {
            ArchipelagoError::Connection(_) => String::from(
                "Cannot connect to the server.\n\
                 \u{2022} Check that the server is running\n\
                 \u{2022} Check the configured server address\n\
                 \u{2022} Check your network connection",
            ),
            ArchipelagoError::Api { message, .. } => message.clone(),
            ArchipelagoError::MissingData(what) => {
                format!("The server response was missing required data: {}", what)
            }
            other => other.to_string(),
        }
    }
}
