pub mod commands;
pub mod login;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{api::Person, log_info};

pub use login::authenticate;

const ENABLE_LOGS: bool = true;

/// Key the session lives under inside the store file.
pub const SESSION_KEY: &str = "usuarioActual";

/// The minimal identity kept between launches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub record: String,
    pub id: String,
    pub user: String,
    pub names: String,
    pub lastnames: String,
    pub mail: String,
}

impl From<Person> for Session {
    fn from(person: Person) -> Self {
        Self {
            record: person.record,
            id: person.id,
            user: person.user,
            names: person.names,
            lastnames: person.lastnames,
            mail: person.mail,
        }
    }
}

impl Session {
    /// "SURNAMES NAMES", upper-cased, as shown on the welcome card.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.lastnames, self.names).to_uppercase()
    }

    /// First given name plus first surname, for the toolbar.
    pub fn short_name(&self) -> String {
        let surname = self.lastnames.split(' ').next().unwrap_or_default();
        let name = self.names.split(' ').next().unwrap_or_default();
        format!("{name} {surname}")
    }
}

/// File-backed key/value store holding the current session.
pub struct SessionStore {
    path: PathBuf,
    data: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {}", path.display()))?;
            serde_json::from_str::<Map<String, Value>>(&contents)
                .ok()
                .and_then(|mut entries| entries.remove(SESSION_KEY))
                .and_then(|value| serde_json::from_value(value).ok())
        } else {
            None
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn save(&self, session: Session) -> Result<()> {
        let mut guard = self.write();
        self.persist(&session)?;
        log_info!("Session stored for user {}", session.user);
        *guard = Some(session);
        Ok(())
    }

    /// Drops everything the store holds, on disk and in memory.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.write();
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session at {}", self.path.display()))?;
        }
        *guard = None;
        Ok(())
    }

    fn persist(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut entries = Map::new();
        entries.insert(SESSION_KEY.to_string(), serde_json::to_value(session)?);
        let serialized = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
