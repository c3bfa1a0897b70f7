use serde::Deserialize;
use std::fs;

#[derive(Debug)]
pub enum ConfigError {
    /// The credentials file is missing or could not be read
    UnreadableFile,
    /// The credentials file is not valid JSON
    MalformedContent,
    /// The named member is absent or empty
    MissingField(&'static str),
}

/// Raw shape of the credentials file. Members may be absent here, validation
/// happens when the raw form is turned into a [`DeviceConfig`]. Unknown
/// members are ignored.
#[derive(Debug, Deserialize)]
struct RawCredentials {
    ssid: Option<String>,
    password: Option<String>,
    webhook: Option<String>,
}

/// Network name, network credential and webhook URL of the device.
///
/// Loaded once at startup and never mutated afterwards. A `DeviceConfig` only
/// exists in validated form: all three members are present and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    ssid: String,
    password: String,
    webhook: String,
}

impl DeviceConfig {
    /// Reads and validates the credentials file.
    ///
    /// # Errors
    ///
    /// - `ConfigError::UnreadableFile`: If the file is missing or unreadable.
    /// - `ConfigError::MalformedContent`: If the file is not valid JSON.
    /// - `ConfigError::MissingField`: If a required member is absent or empty.
    pub fn load(path: &str) -> Result<DeviceConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|_| ConfigError::UnreadableFile)?;
        Self::from_json(&contents)
    }

    /// Parses and validates credentials from their JSON form.
    pub fn from_json(contents: &str) -> Result<DeviceConfig, ConfigError> {
        let raw: RawCredentials =
            serde_json::from_str(contents).map_err(|_| ConfigError::MalformedContent)?;

        Ok(DeviceConfig {
            ssid: required_field(raw.ssid, "ssid")?,
            password: required_field(raw.password, "password")?,
            webhook: required_field(raw.webhook, "webhook")?,
        })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn webhook(&self) -> &str {
        &self.webhook
    }
}

fn required_field(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingField(name)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const FULL: &str = r#"{
        "ssid": "home-network",
        "password": "hunter2",
        "webhook": "https://discord.com/api/webhooks/1/abc"
    }"#;

    #[test]
    fn test0_complete_credentials_load() {
        let config = DeviceConfig::from_json(FULL).unwrap();
        assert_eq!(config.ssid(), "home-network");
        assert_eq!(config.password(), "hunter2");
        assert_eq!(config.webhook(), "https://discord.com/api/webhooks/1/abc");
    }

    #[test]
    fn test1_absent_member_is_rejected() {
        let result = DeviceConfig::from_json(r#"{"ssid": "a", "password": "b"}"#);
        match result {
            Err(ConfigError::MissingField(name)) => assert_eq!(name, "webhook"),
            other => panic!("expected a missing webhook, got {:?}", other),
        }
    }

    #[test]
    fn test2_empty_member_is_rejected() {
        let result =
            DeviceConfig::from_json(r#"{"ssid": "", "password": "b", "webhook": "c"}"#);
        match result {
            Err(ConfigError::MissingField(name)) => assert_eq!(name, "ssid"),
            other => panic!("expected an empty ssid to be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test3_malformed_json_is_rejected() {
        assert!(matches!(
            DeviceConfig::from_json("not json at all"),
            Err(ConfigError::MalformedContent)
        ));
    }

    #[test]
    fn test4_unknown_members_are_ignored() {
        let config = DeviceConfig::from_json(
            r#"{"ssid": "a", "password": "b", "webhook": "c", "comment": "spare"}"#,
        )
        .unwrap();
        assert_eq!(config.ssid(), "a");
    }

    #[test]
    fn test5_missing_file_is_unreadable() {
        assert!(matches!(
            DeviceConfig::load("no-such-credentials.json"),
            Err(ConfigError::UnreadableFile)
        ));
    }
}
