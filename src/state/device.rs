use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use crate::error::DeviceError;

const UNLOCKED_KEY: &str = "gallery_unlocked";

/// Settings that belong to this device rather than to the gallery.
///
/// Currently only the "gallery unlocked" flag. It is stored in a small
/// SQLite database in the user's data directory:
/// - Linux: ~/.local/share/memory-gallery/device.db
/// - macOS: ~/Library/Application Support/memory-gallery/device.db
/// - Windows: %APPDATA%\memory-gallery\device.db
pub struct DeviceState {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl DeviceState {
    /// Open the device database at its default location
    pub fn open_default() -> Result<Self, DeviceError> {
        let path = Self::default_path().ok_or(DeviceError::NoDataDir)?;
        Self::open(&path)
    }

    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self, DeviceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        tracing::info!("Device settings at {}", path.display());
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Settings that are forgotten when the app exits
    pub fn in_memory() -> Result<Self, DeviceError> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn default_path() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("memory-gallery");
        path.push("device.db");
        Some(path)
    }

    fn init(conn: Connection, db_path: Option<PathBuf>) -> Result<Self, DeviceError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn, db_path })
    }

    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn is_unlocked(&self) -> Result<bool, DeviceError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [UNLOCKED_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.as_deref() == Some("true"))
    }

    pub fn set_unlocked(&self, unlocked: bool) -> Result<(), DeviceError> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![UNLOCKED_KEY, if unlocked { "true" } else { "false" }],
        )?;
        Ok(())
    }

    /// Check a passcode against the configured one and persist the result.
    ///
    /// Returns whether the gallery is now unlocked. Without a configured
    /// passcode nothing can unlock it.
    pub fn try_unlock(&self, entered: &str, expected: Option<&str>) -> Result<bool, DeviceError> {
        match expected {
            Some(code) if !code.is_empty() && entered == code => {
                self.set_unlocked(true)?;
                tracing::info!("Gallery unlocked on this device");
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl std::fmt::Debug for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceState")
            .field("db_path", &self.db_path)
            .finish()
    }
}
