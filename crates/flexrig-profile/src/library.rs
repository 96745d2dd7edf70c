//! Profile libraries: the ordered set of profiles kept in one file.
//!
//! A profile file holds either a single profile object or an array of them.
//! Saving always writes the array form.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::profile::Profile;

#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileFile {
    Many(Vec<Profile>),
    One(Box<Profile>),
}

/// An ordered collection of profiles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileLibrary {
    profiles: Vec<Profile>,
}

impl ProfileLibrary {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// Parses either a single profile or an array of profiles.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profiles = match serde_json::from_str::<ProfileFile>(json)? {
            ProfileFile::Many(profiles) => profiles,
            ProfileFile::One(profile) => vec![*profile],
        };
        Ok(Self { profiles })
    }

    /// Serializes the library as a pretty-printed JSON array.
    pub fn to_json_pretty(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(&self.profiles)?)
    }

    /// Loads a library from a file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Saves the library, replacing `path` only once the new content is fully written.
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        let json = self.to_json_pretty()?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profiles.json".to_string());
        let staging = path.with_file_name(format!(".~{}", file_name));

        let write = || -> std::io::Result<()> {
            let mut file = std::fs::File::create(&staging)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            std::fs::rename(&staging, path)
        };

        if let Err(e) = write() {
            let _ = std::fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profiles_mut(&mut self) -> &mut [Profile] {
        &mut self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Returns profile names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    /// Finds the first profile with the given name.
    pub fn find(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Finds the first profile with the given name, mutably.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.name == name)
    }

    /// Selects a profile by name, or the first profile when no name is given.
    pub fn select(&self, name: Option<&str>) -> Result<&Profile, ProfileError> {
        match name {
            Some(name) => self
                .find(name)
                .ok_or_else(|| ProfileError::ProfileNotFound(name.to_string())),
            None => self.profiles.first().ok_or(ProfileError::EmptyLibrary),
        }
    }
}
