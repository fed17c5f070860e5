//! Display configuration and protocol registration metadata
//!
//! Dissection itself takes no configuration. These types only govern how a
//! host renders the records (see [`crate::display`]).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Registration metadata a host uses to list the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProtocolInfo {
    /// Full protocol name, used as the root display item label
    pub name: &'static str,
    /// Abbreviation shown in protocol columns
    pub short_name: &'static str,
    /// Name under which the dissector is registered and filtered
    pub filter_name: &'static str,
}

impl ProtocolInfo {
    /// Session Description Protocol
    pub const SDP: ProtocolInfo = ProtocolInfo {
        name: "Session Description Protocol",
        short_name: "SDP",
        filter_name: "sdp",
    };
}

/// Configuration for rendering dissected SDP records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Appended to the host's protocol column
    pub protocol_suffix: String,
    /// Appended to the host's info column
    pub info_suffix: String,
    /// Escape non-printable bytes instead of decoding values lossily as UTF-8
    pub escape_non_printable: bool,
    /// Maximum number of value bytes rendered per item; `None` renders all
    pub max_value_len: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            protocol_suffix: format!("/{}", ProtocolInfo::SDP.short_name),
            info_suffix: ", with session description".to_string(),
            escape_non_printable: true,
            max_value_len: None,
        }
    }
}

impl DisplayConfig {
    /// Create the default display configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the protocol column suffix
    pub fn with_protocol_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.protocol_suffix = suffix.into();
        self
    }

    /// Set the info column suffix
    pub fn with_info_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.info_suffix = suffix.into();
        self
    }

    /// Render values as lossy UTF-8 rather than escaped text
    pub fn with_lossy_text(mut self) -> Self {
        self.escape_non_printable = false;
        self
    }

    /// Cap the number of value bytes rendered per item
    pub fn with_max_value_len(mut self, len: usize) -> Self {
        self.max_value_len = Some(len);
        self
    }

    /// Check the configuration for values the renderer cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.protocol_suffix.is_empty() {
            return Err(Error::config("protocol suffix must not be empty"));
        }
        if self.max_value_len == Some(0) {
            return Err(Error::config("max value length must be at least 1"));
        }
        Ok(())
    }

    /// Load a configuration from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DisplayConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.protocol_suffix, "/SDP");
        assert_eq!(config.info_suffix, ", with session description");
        assert!(config.escape_non_printable);
        assert_eq!(config.max_value_len, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = DisplayConfig::new()
            .with_protocol_suffix("/sdp")
            .with_info_suffix("")
            .with_lossy_text()
            .with_max_value_len(16);
        assert_eq!(config.protocol_suffix, "/sdp");
        assert!(config.info_suffix.is_empty());
        assert!(!config.escape_non_printable);
        assert_eq!(config.max_value_len, Some(16));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = DisplayConfig::new().with_protocol_suffix("");
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = DisplayConfig::new().with_max_value_len(0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_json_partial() {
        let config = DisplayConfig::from_json(r#"{"max_value_len": 32}"#).unwrap();
        assert_eq!(config.max_value_len, Some(32));
        assert_eq!(config.protocol_suffix, "/SDP");

        let err = DisplayConfig::from_json(r#"{"protocol_suffix": ""}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = DisplayConfig::from_json("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = DisplayConfig::new().with_max_value_len(8);
        let json = config.to_json().unwrap();
        assert_eq!(DisplayConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_protocol_info() {
        assert_eq!(ProtocolInfo::SDP.name, "Session Description Protocol");
        assert_eq!(ProtocolInfo::SDP.short_name, "SDP");
        assert_eq!(ProtocolInfo::SDP.filter_name, "sdp");
    }
}
