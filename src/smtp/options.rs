#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Identity and target used by [`probe`](super::probe).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Name announced in EHLO/HELO.
    pub helo_domain: String,
    /// Envelope sender for MAIL FROM. It is never a real mailbox.
    pub mail_from: String,
    pub port: u16,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            helo_domain: "localhost".to_string(),
            mail_from: "test@example.com".to_string(),
            port: 25,
        }
    }
}
