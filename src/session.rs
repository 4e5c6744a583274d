/// The client's view of the simulation session.
///
/// This mirrors the commands the user has issued, not what the server is
/// actually doing; the two may disagree until the next snapshot arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Whether a simulation has been started and not stopped since.
    pub running: bool,
    /// Whether adaptive signal control has been requested.
    pub ai_enabled: bool,
}

/// What the status indicator shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No message has been accepted yet.
    #[default]
    Connecting,
    /// Updates are arriving.
    Online,
    /// The user stopped the simulation.
    Stopped,
    /// The transport was lost.
    Offline,
}

impl ConnectionStatus {
    /// A short label for the indicator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Online => "online",
            Self::Stopped => "stopped",
            Self::Offline => "offline",
        }
    }
}
