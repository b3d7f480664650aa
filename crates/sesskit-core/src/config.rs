//! Configuration management
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数
//! 2. sesskit.toml 設定ファイル
//! 3. デフォルト値

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Container keys for the five reserved session slots
///
/// The manager stores its record fields and the two namespaces under these
/// keys inside the backing store's container. Embedders that share the
/// container with their own keys can rename the slots to avoid collisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotKeys {
    /// Key holding the registered session identifier
    #[serde(default = "default_id_key")]
    pub id: String,

    /// Key holding the expiration timestamp (unix seconds)
    #[serde(default = "default_expire_key")]
    pub expire: String,

    /// Key holding the registration timestamp (unix seconds)
    #[serde(default = "default_start_key")]
    pub start: String,

    /// Key holding the flash namespace map
    #[serde(default = "default_flash_key")]
    pub flash: String,

    /// Key holding the data namespace map
    #[serde(default = "default_data_key")]
    pub data: String,
}

impl Default for SlotKeys {
    fn default() -> Self {
        Self {
            id: default_id_key(),
            expire: default_expire_key(),
            start: default_start_key(),
            flash: default_flash_key(),
            data: default_data_key(),
        }
    }
}

impl SlotKeys {
    /// Check that the five slot keys are non-empty and pairwise distinct
    pub fn validate(&self) -> Result<()> {
        let keys = [&self.id, &self.expire, &self.start, &self.flash, &self.data];

        if keys.iter().any(|key| key.is_empty()) {
            return Err(Error::Config("Slot keys must be non-empty".to_string()));
        }

        for (i, key) in keys.iter().enumerate() {
            if keys[i + 1..].contains(key) {
                return Err(Error::Config(format!("Duplicate slot key: {}", key)));
            }
        }

        Ok(())
    }
}

fn default_id_key() -> String {
    "__session_id__".to_string()
}

fn default_expire_key() -> String {
    "__session_expire__".to_string()
}

fn default_start_key() -> String {
    "__session_start__".to_string()
}

fn default_flash_key() -> String {
    "__session_flash__".to_string()
}

fn default_data_key() -> String {
    "__session_data__".to_string()
}

/// Main configuration for sesskit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lifetime in minutes applied by `register_default` (0 = the session
    /// expires within the same minute it was registered)
    #[serde(default)]
    pub default_lifetime_minutes: u32,

    /// Reserved container slot keys
    #[serde(default)]
    pub slots: SlotKeys,
}

impl SessionConfig {
    /// TOML 文字列から設定を読み込む
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        config.slots.validate()?;
        Ok(config)
    }

    /// TOML 設定ファイルから設定を読み込む
    ///
    /// ファイルの値は既存の環境変数で上書きされます（環境変数が優先）。
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        config.slots.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.slots.validate()?;
        Ok(config)
    }

    /// デフォルトパスから設定を読み込む
    ///
    /// カレントディレクトリに `sesskit.toml` があればそれを使い、
    /// なければ環境変数のみから読み込みます。
    pub fn load() -> Result<Self> {
        if Path::new("sesskit.toml").exists() {
            return Self::from_toml_file("sesskit.toml");
        }

        Self::from_env()
    }

    /// 環境変数で設定を上書きする
    fn apply_env_overrides(&mut self) {
        if let Ok(minutes) = std::env::var("SESSION_LIFETIME_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                self.default_lifetime_minutes = minutes;
            }
        }

        for (name, slot) in [
            ("SESSION_SLOT_ID", &mut self.slots.id),
            ("SESSION_SLOT_EXPIRE", &mut self.slots.expire),
            ("SESSION_SLOT_START", &mut self.slots.start),
            ("SESSION_SLOT_FLASH", &mut self.slots.flash),
            ("SESSION_SLOT_DATA", &mut self.slots.data),
        ] {
            if let Ok(value) = std::env::var(name) {
                *slot = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_slot_keys_default() {
        let slots = SlotKeys::default();
        assert_eq!(slots.id, "__session_id__");
        assert_eq!(slots.expire, "__session_expire__");
        assert_eq!(slots.start, "__session_start__");
        assert_eq!(slots.flash, "__session_flash__");
        assert_eq!(slots.data, "__session_data__");
        assert!(slots.validate().is_ok());
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.default_lifetime_minutes, 0);
        assert_eq!(config.slots, SlotKeys::default());
    }

    #[test]
    fn test_from_toml_str() {
        let config = SessionConfig::from_toml_str(
            r#"
default_lifetime_minutes = 30

[slots]
flash = "app_flash"
"#,
        )
        .unwrap();

        assert_eq!(config.default_lifetime_minutes, 30);
        assert_eq!(config.slots.flash, "app_flash");
        // Unspecified slots keep their defaults
        assert_eq!(config.slots.id, "__session_id__");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = SessionConfig::from_toml_str("default_lifetime_minutes = \"ten\"");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_duplicate_slot_keys_rejected() {
        let result = SessionConfig::from_toml_str(
            r#"
[slots]
flash = "shared"
data = "shared"
"#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_slot_key_rejected() {
        let slots = SlotKeys {
            id: String::new(),
            ..SlotKeys::default()
        };
        assert!(matches!(slots.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[slots]").unwrap();
        writeln!(file, "data = \"app_data\"").unwrap();

        // Assert on a slot key: the lifetime field is subject to env
        // overrides, which test_env_override mutates in parallel
        let config = SessionConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.slots.data, "app_data");
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = SessionConfig::from_toml_file("does-not-exist.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_env_overrides_file_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[slots]").unwrap();
        writeln!(file, "start = \"file_start\"").unwrap();

        // 環境変数がファイルの値より優先される
        unsafe {
            std::env::set_var("SESSION_SLOT_START", "env_start");
        }
        let config = SessionConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.slots.start, "env_start");

        unsafe {
            std::env::remove_var("SESSION_SLOT_START");
        }
        let config = SessionConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.slots.start, "file_start");
    }

    #[test]
    fn test_env_override() {
        // テスト用環境変数を設定
        unsafe {
            std::env::set_var("SESSION_LIFETIME_MINUTES", "15");
            std::env::set_var("SESSION_SLOT_FLASH", "env_flash");
        }
        let config = SessionConfig::from_env().unwrap();
        assert_eq!(config.default_lifetime_minutes, 15);
        assert_eq!(config.slots.flash, "env_flash");
        assert_eq!(config.slots.data, "__session_data__");

        // 解析できない値は無視される
        unsafe {
            std::env::set_var("SESSION_LIFETIME_MINUTES", "soon");
        }
        let config = SessionConfig::from_env().unwrap();
        assert_eq!(config.default_lifetime_minutes, 0);

        unsafe {
            std::env::remove_var("SESSION_LIFETIME_MINUTES");
            std::env::remove_var("SESSION_SLOT_FLASH");
        }
    }
}
