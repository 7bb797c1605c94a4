use crate::paths::Separator;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BASE_PATH_KEY: &str = "basePath";
pub const SEPARATOR_KEY: &str = "separator";
pub const NOTICE_PREFIX: &str = "notice:";
const APP_DIR: &str = "ffcmd";
const FILE_NAME: &str = "prefs.json";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("cannot read preferences {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write preferences {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Flat string key-value store backed by one JSON file. Last write wins.
#[derive(Debug, Clone)]
pub struct Prefs {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Prefs {
    /// Load `path`. A missing file is an empty store; an unreadable JSON body
    /// is logged and treated as empty so a bad file never blocks startup.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(body) => match serde_json::from_str(&body) {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "ignoring corrupt preferences");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PrefsError::Read { path, source }),
        };
        tracing::debug!(path = %path.display(), entries = values.len(), "preferences loaded");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set `key` and rewrite the file.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), PrefsError> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    pub fn base_path(&self) -> &str {
        self.get(BASE_PATH_KEY).unwrap_or_default()
    }

    pub fn set_base_path(&mut self, base: &str) -> Result<(), PrefsError> {
        if base.is_empty() {
            self.remove(BASE_PATH_KEY)
        } else {
            self.set(BASE_PATH_KEY, base)
        }
    }

    pub fn separator(&self) -> Separator {
        self.get(SEPARATOR_KEY)
            .and_then(Separator::parse)
            .unwrap_or_default()
    }

    pub fn set_separator(&mut self, separator: Separator) -> Result<(), PrefsError> {
        self.set(SEPARATOR_KEY, separator.as_str())
    }

    pub fn has_seen_notice(&self, url: &str) -> bool {
        self.get(&notice_key(url)).is_some()
    }

    pub fn mark_notice_seen(&mut self, url: &str) -> Result<(), PrefsError> {
        self.set(&notice_key(url), "true")
    }

    fn save(&self) -> Result<(), PrefsError> {
        let body = serde_json::to_string_pretty(&self.values)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PrefsError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, body).map_err(|source| PrefsError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}

fn notice_key(url: &str) -> String {
    format!("{NOTICE_PREFIX}{url}")
}

/// `$XDG_CONFIG_HOME/ffcmd`, `%APPDATA%\ffcmd`, `$HOME/.config/ffcmd`, else the cwd.
pub fn default_path() -> PathBuf {
    let dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("APPDATA").map(PathBuf::from))
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));

    match dir {
        Some(dir) => dir.join(APP_DIR).join(FILE_NAME),
        None => PathBuf::from(format!("{APP_DIR}_{FILE_NAME}")),
    }
}
