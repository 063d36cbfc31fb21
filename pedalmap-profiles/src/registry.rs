//! Profile Registry
//!
//! Thread-safe map from profile name to a validated profile. A profile is
//! only admitted once its engine snapshot has passed validation, so a lookup
//! never hands out a configuration the engine would refuse.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use include_dir::{include_dir, Dir};
use pedalmap_core::config::EngineConfig;

use crate::{document::ProfileDocument, ProfileError};

/// Profiles shipped inside the binary
static BUILTIN_PROFILES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/profiles");

/// Registered profile with its validated snapshot
#[derive(Debug, Clone)]
struct ProfileEntry {
    document: ProfileDocument,
    config: EngineConfig,
}

/// Thread-safe profile registry
pub struct ProfileRegistry {
    profiles: RwLock<HashMap<String, ProfileEntry>>,
}

impl ProfileRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Validate and register a profile, returning its snapshot
    ///
    /// Registering a name twice is an error; use [`Self::replace`] to update.
    pub fn register(&self, document: ProfileDocument) -> Result<EngineConfig, ProfileError> {
        let config = document.to_config()?;
        let mut profiles = self.profiles.write()
            .map_err(|_| ProfileError::Poisoned)?;

        if profiles.contains_key(&document.name) {
            return Err(ProfileError::Duplicate(document.name));
        }

        log::debug!("Registered profile '{}'", document.name);
        profiles.insert(document.name.clone(), ProfileEntry { document, config });
        Ok(config)
    }

    /// Validate and register a profile, overwriting any existing entry
    pub fn replace(&self, document: ProfileDocument) -> Result<EngineConfig, ProfileError> {
        let config = document.to_config()?;
        let mut profiles = self.profiles.write()
            .map_err(|_| ProfileError::Poisoned)?;

        log::debug!("Replaced profile '{}'", document.name);
        profiles.insert(document.name.clone(), ProfileEntry { document, config });
        Ok(config)
    }

    /// Parse, validate and register a profile file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<EngineConfig, ProfileError> {
        self.register(ProfileDocument::load_file(path)?)
    }

    /// Engine snapshot for a profile
    pub fn get(&self, name: &str) -> Result<EngineConfig, ProfileError> {
        let profiles = self.profiles.read()
            .map_err(|_| ProfileError::Poisoned)?;

        profiles.get(name)
            .map(|entry| entry.config)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))
    }

    /// Source document for a profile
    pub fn document(&self, name: &str) -> Result<ProfileDocument, ProfileError> {
        let profiles = self.profiles.read()
            .map_err(|_| ProfileError::Poisoned)?;

        profiles.get(name)
            .map(|entry| entry.document.clone())
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))
    }

    /// Sorted profile names
    pub fn names(&self) -> Result<Vec<String>, ProfileError> {
        let profiles = self.profiles.read()
            .map_err(|_| ProfileError::Poisoned)?;

        let mut names: Vec<String> = profiles.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Register every profile embedded in the crate
    pub fn load_builtins(&self) -> Result<(), ProfileError> {
        for file in BUILTIN_PROFILES.files() {
            if file.path().extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let json = file.contents_utf8().ok_or_else(|| {
                ProfileError::Parse(format!("{} is not UTF-8", file.path().display()))
            })?;
            self.register(ProfileDocument::from_json(json)?)?;
        }
        Ok(())
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    /// Global registry with the built-in profiles loaded
    pub static ref BUILTIN_REGISTRY: ProfileRegistry = {
        let registry = ProfileRegistry::new();
        if let Err(e) = registry.load_builtins() {
            log::error!("Built-in profiles failed to load: {}", e);
        }
        registry
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endurance() -> ProfileDocument {
        ProfileDocument::from_config("endurance_copy", &EngineConfig::default())
    }

    #[test]
    fn register_and_retrieve() {
        let registry = ProfileRegistry::new();
        registry.register(endurance()).unwrap();

        assert_eq!(registry.get("endurance_copy").unwrap(), EngineConfig::default());
        assert_eq!(registry.document("endurance_copy").unwrap().name, "endurance_copy");
    }

    #[test]
    fn duplicate_rejected_replace_allowed() {
        let registry = ProfileRegistry::new();
        registry.register(endurance()).unwrap();
        assert!(matches!(registry.register(endurance()), Err(ProfileError::Duplicate(_))));

        let mut tuned = endurance();
        tuned.forward_factor = 180.0;
        registry.replace(tuned).unwrap();
        assert_eq!(registry.get("endurance_copy").unwrap().factors.forward_factor, 180.0);
    }

    #[test]
    fn invalid_profile_not_admitted() {
        let registry = ProfileRegistry::new();
        let mut bad = endurance();
        bad.max_regen_current = 0.0;

        assert!(matches!(registry.register(bad), Err(ProfileError::Invalid(_))));
        assert!(matches!(registry.get("endurance_copy"), Err(ProfileError::NotFound(_))));
    }

    #[test]
    fn builtins_load() {
        let registry = ProfileRegistry::new();
        registry.load_builtins().unwrap();

        assert_eq!(registry.names().unwrap(), vec!["dyno", "endurance", "low_grip"]);
        assert_eq!(registry.get("endurance").unwrap(), EngineConfig::default());

        let low_grip = registry.get("low_grip").unwrap();
        assert_eq!(low_grip.regen_gate.map(|g| g.min_speed_kmh), Some(5.0));
    }

    #[test]
    fn global_registry_has_builtins() {
        assert!(BUILTIN_REGISTRY.get("endurance").is_ok());
    }
}
