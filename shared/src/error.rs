use thiserror::Error;

/// Everything that can go wrong with one upstream API call, from the socket
/// to flattening the payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{api}: request failed: {source}")]
    Transport {
        api: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{api}: HTTP {status}: {message}")]
    Status {
        api: &'static str,
        status: u16,
        message: String,
    },

    #[error("{api}: {message}")]
    Api { api: &'static str, message: String },

    #[error("{api}: response is not flagged as successful")]
    NotSuccessful { api: &'static str },

    #[error("{api}: undecodable response: {source}")]
    Decode {
        api: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{api}: malformed date {value:?}")]
    MalformedDate { api: &'static str, value: String },
}

impl FetchError {
    pub fn api(&self) -> &'static str {
        match self {
            Self::Transport { api, .. }
            | Self::Status { api, .. }
            | Self::Api { api, .. }
            | Self::NotSuccessful { api }
            | Self::Decode { api, .. }
            | Self::MalformedDate { api, .. } => api,
        }
    }
}
