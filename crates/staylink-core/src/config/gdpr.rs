//! GDPR lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Timing windows for GDPR data-subject-rights requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GdprConfig {
    /// How long an export download link stays valid, in days.
    #[serde(default = "default_export_validity")]
    pub export_validity_days: i64,
    /// Grace period before a requested deletion is executed, in days.
    /// The request can be cancelled during this window.
    #[serde(default = "default_deletion_grace")]
    pub deletion_grace_days: i64,
}

impl Default for GdprConfig {
    fn default() -> Self {
        Self {
            export_validity_days: default_export_validity(),
            deletion_grace_days: default_deletion_grace(),
        }
    }
}

fn default_export_validity() -> i64 {
    7
}

fn default_deletion_grace() -> i64 {
    30
}
