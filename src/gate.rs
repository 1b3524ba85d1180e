//! Password gate shown before the game view
//!
//! A plain string comparison against a fixed credential. No hashing,
//! lockout or rate limiting.

/// Credential the page ships with
pub const DEFAULT_CREDENTIAL: &str = "12345";

/// Result of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Reveal the game view and start the game
    Unlocked,
    /// Keep the locked view and show an error
    Rejected,
}

impl GateOutcome {
    /// Text for the gate's error line
    pub fn message(&self) -> &'static str {
        match self {
            GateOutcome::Unlocked => "",
            GateOutcome::Rejected => "Incorrect password. Please try again.",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    credential: String,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIAL)
    }
}

impl AccessGate {
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
        }
    }

    pub fn submit(&self, attempt: &str) -> GateOutcome {
        if attempt == self.credential {
            log::info!("Gate unlocked");
            GateOutcome::Unlocked
        } else {
            log::warn!("Gate rejected an attempt");
            GateOutcome::Rejected
        }
    }
}
