//! Admin mode switch.
//!
//! [`ConvenienceGate`] decides whether the storefront shows its admin section.
//! It is a UI mode toggle, not access control: the passphrase ships with the
//! page and the catalog endpoints do not consult it.

/// Notification shown when the typed passphrase does not match.
pub const ACCESS_DENIED_MESSAGE: &str = "Access Denied.";

/// Prompt text asking for the admin passphrase.
pub const PASSPHRASE_PROMPT: &str = "Enter admin password:";

/// Result of checking a prompt answer against the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Granted,
    /// The answer did not match. An empty answer is a wrong answer.
    Denied,
    /// The prompt was dismissed.
    Cancelled,
}

/// Exact-match passphrase check.
#[derive(Clone, PartialEq, Eq)]
pub struct ConvenienceGate {
    passphrase: String,
}

impl std::fmt::Debug for ConvenienceGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvenienceGate").finish_non_exhaustive()
    }
}

impl ConvenienceGate {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// Check a prompt answer. `None` is a dismissed prompt; any typed answer,
    /// including the empty string, must match exactly. An empty passphrase
    /// never grants access.
    pub fn check(&self, answer: Option<&str>) -> GateOutcome {
        match answer {
            None => GateOutcome::Cancelled,
            Some(answer) if !answer.is_empty() && answer == self.passphrase => {
                GateOutcome::Granted
            }
            Some(_) => GateOutcome::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let gate = ConvenienceGate::new("admin123");
        assert_eq!(gate.check(Some("admin123")), GateOutcome::Granted);
        assert_eq!(gate.check(Some("Admin123")), GateOutcome::Denied);
        assert_eq!(gate.check(Some("admin123 ")), GateOutcome::Denied);
        assert_eq!(gate.check(Some("wrong")), GateOutcome::Denied);
    }

    #[test]
    fn dismissed_is_cancelled_but_empty_is_denied() {
        let gate = ConvenienceGate::new("admin123");
        assert_eq!(gate.check(None), GateOutcome::Cancelled);
        assert_eq!(gate.check(Some("")), GateOutcome::Denied);
    }

    #[test]
    fn empty_passphrase_never_grants() {
        let gate = ConvenienceGate::new("");
        assert_eq!(gate.check(Some("")), GateOutcome::Denied);
    }

    #[test]
    fn debug_hides_passphrase() {
        let gate = ConvenienceGate::new("admin123");
        assert!(!format!("{gate:?}").contains("admin123"));
    }
}
