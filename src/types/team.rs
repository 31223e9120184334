//! Team types
//!
//! A team groups channels. The exporter reads teams twice: once to let the
//! operator pick one, and once per exported channel to record the team's
//! display name in the document.

use serde::{Deserialize, Serialize};

/// Represents a team on the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier for this team
    pub id: String,
    /// Team name (unique identifier, used in URLs)
    pub name: String,
    /// Display name (what users see)
    pub display_name: String,
}

impl Team {
    /// Create a new team
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Team {
            id: id.into(),
            name: name.into(),
            display_name: display_name.into(),
        }
    }

    /// The name to show for this team, falling back to the URL name
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}
