//! Application configuration
//!
//! Read from `<config dir>/memory-gallery/config.toml` when present, then
//! overridden by `MEMORY_GALLERY_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hosted backend connection
    pub remote: RemoteConfig,

    /// Passcode that unlocks editing and uploads on this device
    pub passcode: Option<String>,

    /// Text shown in the hero banner
    pub site: SiteConfig,

    /// Limits applied to photos before upload
    pub encoder: EncoderConfig,

    /// Directory holding the bundled seed photos
    pub assets_dir: Option<PathBuf>,

    /// Background music file
    pub music: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub supabase_url: String,

    /// Public anon key sent with every request
    pub anon_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub subtitle: String,
    pub title: String,
    pub tagline: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            subtitle: "The Union of".to_string(),
            title: "The Two of Us".to_string(),
            tagline: "A story written in moments, not words.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Longest edge of an uploaded photo, in pixels
    pub max_dimension: u32,

    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1920,
            jpeg_quality: 80,
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Default location (~/.config/memory-gallery/config.toml on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("memory-gallery").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("MEMORY_GALLERY_SUPABASE_URL") {
            self.remote.supabase_url = url;
        }
        if let Some(key) = var("MEMORY_GALLERY_SUPABASE_ANON_KEY") {
            self.remote.anon_key = key;
        }
        if let Some(code) = var("MEMORY_GALLERY_PASSCODE") {
            self.passcode = Some(code);
        }
        if let Some(dir) = var("MEMORY_GALLERY_ASSETS_DIR") {
            self.assets_dir = Some(PathBuf::from(dir));
        }
        if let Some(file) = var("MEMORY_GALLERY_MUSIC") {
            self.music = Some(PathBuf::from(file));
        }
    }

    /// Where the seed photos live; defaults to `assets/images` next to the binary's sources
    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("images"))
    }

    pub fn music_path(&self) -> PathBuf {
        self.music.clone().unwrap_or_else(|| {
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("assets")
                .join("audio")
                .join("background.mp3")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
passcode = "0212"

[remote]
supabase_url = "https://abc.supabase.co"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.passcode.as_deref(), Some("0212"));
        assert_eq!(config.remote.supabase_url, "https://abc.supabase.co");
        assert_eq!(config.remote.anon_key, "");
        assert_eq!(config.encoder.max_dimension, 1920);
        assert_eq!(config.site.subtitle, "The Union of");
        assert!(config.music_path().ends_with("assets/audio/background.mp3"));
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("MEMORY_GALLERY_SUPABASE_URL", "https://env.supabase.co"),
            ("MEMORY_GALLERY_PASSCODE", "9999"),
            ("MEMORY_GALLERY_MUSIC", "/srv/song.ogg"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.remote.supabase_url = "https://file.supabase.co".to_string();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.remote.supabase_url, "https://env.supabase.co");
        assert_eq!(config.passcode.as_deref(), Some("9999"));
        assert!(config.assets_dir.is_none());
        assert_eq!(config.music_path(), PathBuf::from("/srv/song.ogg"));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "passcode = [").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse(_))));
    }
}
