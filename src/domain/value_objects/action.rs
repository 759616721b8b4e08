use std::fmt;

/// What the caller does once an action's request has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Refresh the container listing, ignoring the response.
    Reload,
    /// Log the response text and leave the listing alone.
    Log,
}

/// An action the server performs on a named container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Start,
    Stop,
    Restart,
    Update,
    Install,
}

impl Action {
    /// POST path handling this action.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Start => "/start",
            Self::Stop => "/stop",
            Self::Restart => "/restart",
            Self::Update => "/update",
            Self::Install => "/install",
        }
    }

    pub fn completion(&self) -> Completion {
        match self {
            Self::Start | Self::Stop | Self::Restart => Completion::Reload,
            Self::Update | Self::Install => Completion::Log,
        }
    }

    pub fn as_str(&self) -> &'static str {
        &self.path()[1..]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Action::Start.path(), "/start");
        assert_eq!(Action::Install.as_str(), "install");
    }

    #[test]
    fn test_update_and_install_never_reload() {
        assert_eq!(Action::Update.completion(), Completion::Log);
        assert_eq!(Action::Install.completion(), Completion::Log);
        assert_eq!(Action::Start.completion(), Completion::Reload);
        assert_eq!(Action::Stop.completion(), Completion::Reload);
    }
}
