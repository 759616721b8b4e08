use std::fmt;

/// Name of a container as known to the Docker engine and to the
/// compose template directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerName(String);

#[derive(Debug, thiserror::Error)]
pub enum ContainerNameError {
    #[error("Container name is empty")]
    Empty,

    #[error("Container name contains invalid characters: {0:?}")]
    InvalidCharacters(String),

    #[error("Container name cannot start with '.': {0}")]
    LeadingDot(String),
}

impl ContainerName {
    pub fn new(name: impl Into<String>) -> Result<Self, ContainerNameError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(ContainerNameError::Empty);
        }

        // Joined onto the install directory, so no separators or whitespace
        if name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '/' || c == '\\')
        {
            return Err(ContainerNameError::InvalidCharacters(name));
        }

        if name.starts_with('.') {
            return Err(ContainerNameError::LeadingDot(name));
        }

        Ok(Self(name))
    }

    /// Build a name from an engine-reported container name, which Docker
    /// prefixes with `/`.
    pub fn from_engine(name: &str) -> Result<Self, ContainerNameError> {
        Self::new(name.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for ContainerName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ContainerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ContainerName::new(s).map_err(serde::de::Error::custom)
    }
}
