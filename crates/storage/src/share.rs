//! Share channel - snapshots carried in a URL query parameter.
//!
//! The payload is the JSON snapshot record, percent-encoded so it survives as a
//! single query value (`?data=...`).

use gradplan_core::{Snapshot, SnapshotRecord};
use tracing::debug;
use url::Url;

/// Default query parameter carrying the payload.
pub const DEFAULT_PARAM: &str = "data";

/// Errors decoding a shared payload.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Percent-decoding produced invalid UTF-8
    #[error("invalid percent-encoding: {0}")]
    Percent(#[from] std::string::FromUtf8Error),

    /// Payload is not a snapshot record
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// URL without the payload parameter
    #[error("URL has no '{0}' parameter")]
    MissingParameter(String),
}

/// Turns snapshots into opaque strings and back.
pub trait ShareChannel: Send + Sync {
    /// Encode a snapshot.
    fn encode(&self, snapshot: &Snapshot) -> String;

    /// Decode a payload produced by [`ShareChannel::encode`].
    fn decode(&self, payload: &str) -> Result<Snapshot, DecodeError>;
}

/// Query-string share channel.
#[derive(Debug, Clone)]
pub struct QueryShare {
    param: String,
}

impl QueryShare {
    /// Channel using the `data` parameter.
    pub fn new() -> Self {
        Self {
            param: DEFAULT_PARAM.to_string(),
        }
    }

    /// Use a different query parameter.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    /// Link to `base` carrying the snapshot.
    pub fn share_url(&self, base: &str, snapshot: &Snapshot) -> String {
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", base, separator, self.param, self.encode(snapshot))
    }

    /// Decode user input: either a full link carrying the parameter or a bare
    /// payload.
    pub fn decode_input(&self, input: &str) -> Result<Snapshot, DecodeError> {
        let input = input.trim();
        match Url::parse(input) {
            Ok(url) => {
                // Query values come back already percent-decoded.
                let value = url
                    .query_pairs()
                    .find(|(key, _)| key == self.param.as_str())
                    .map(|(_, value)| value.into_owned())
                    .ok_or_else(|| DecodeError::MissingParameter(self.param.clone()))?;
                debug!("Decoding shared snapshot from link parameter '{}'", self.param);
                parse_record(&value)
            }
            Err(_) => self.decode(input),
        }
    }
}

impl Default for QueryShare {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareChannel for QueryShare {
    fn encode(&self, snapshot: &Snapshot) -> String {
        let record = SnapshotRecord::stamped(snapshot);
        // A record of strings and integers always serializes.
        let json = serde_json::to_string(&record).unwrap_or_default();
        urlencoding::encode(&json).into_owned()
    }

    fn decode(&self, payload: &str) -> Result<Snapshot, DecodeError> {
        let json = urlencoding::decode(payload.trim())?;
        parse_record(&json)
    }
}

fn parse_record(json: &str) -> Result<Snapshot, DecodeError> {
    let record: SnapshotRecord = serde_json::from_str(json)?;
    Ok(Snapshot::from(record))
}
