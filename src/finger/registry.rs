use crate::finger::{Finger, FingerError};

/// Ordered table of fingers keyed by lookup name
#[derive(Debug, Clone, Default)]
pub struct FingerRegistry {
    fingers: Vec<(String, Finger)>,
}

impl FingerRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every available finger under its default name
    pub fn with_defaults() -> Self {
        Self {
            fingers: Finger::ALL
                .iter()
                .map(|finger| (finger.name().to_string(), *finger))
                .collect(),
        }
    }

    /// Registers a finger under a lookup name
    ///
    /// # Errors
    ///
    /// Returns [`FingerError::Duplicated`] if the name is taken.
    pub fn register(&mut self, name: impl Into<String>, finger: Finger) -> Result<(), FingerError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(FingerError::Duplicated(name));
        }
        self.fingers.push((name, finger));
        Ok(())
    }

    /// Returns true if a finger is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.fingers.iter().any(|(registered, _)| registered == name)
    }

    /// Looks up a finger by name
    pub fn get(&self, name: &str) -> Option<Finger> {
        self.fingers
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, finger)| *finger)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.fingers.iter().map(|(name, _)| name.clone()).collect();
        names.sort();
        names
    }

    /// Keeps only the named fingers, preserving registration order
    ///
    /// # Errors
    ///
    /// Returns [`FingerError::Unknown`] for a name that is not registered.
    pub fn select(&self, names: &[String]) -> Result<FingerRegistry, FingerError> {
        if let Some(unknown) = names.iter().find(|name| !self.contains(name)) {
            return Err(FingerError::Unknown(unknown.clone()));
        }

        Ok(Self {
            fingers: self
                .fingers
                .iter()
                .filter(|(name, _)| names.contains(name))
                .cloned()
                .collect(),
        })
    }

    /// Iterates over `(name, finger)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Finger)> {
        self.fingers
            .iter()
            .map(|(name, finger)| (name.as_str(), *finger))
    }

    /// Number of registered fingers
    pub fn len(&self) -> usize {
        self.fingers.len()
    }

    /// Returns true if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.fingers.is_empty()
    }
}
