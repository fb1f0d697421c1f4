//! Actor (user) context
//!
//! Read-only within the engine. Role-based constraints are applied once,
//! as a pure normalization at construction time, so every consumer sees an
//! already-consistent context: a `Junior` actor never carries junior
//! delegation fields or the auto-assign preference.

use serde::{Deserialize, Serialize};

/// Actor role, constrains available workflow actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    /// Senior lawyer, may delegate to a junior
    Senior,
    /// Junior lawyer, may never delegate
    Junior,
}

/// Per-actor workflow preferences
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActorPreferences {
    /// Auto-assign the configured junior on case creation
    pub auto_assign_junior: bool,
    /// Allow outbound client emails at all
    pub send_client_emails: bool,
    /// Hearing reminder lead time in hours
    pub reminder_lead_hours: u32,
}

impl Default for ActorPreferences {
    fn default() -> Self {
        Self {
            auto_assign_junior: false,
            send_client_emails: true,
            reminder_lead_hours: 24,
        }
    }
}

/// Immutable actor context consumed by the whole workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorContext {
    /// External user identifier
    pub id: String,
    /// Actor role
    pub role: ActorRole,
    /// Display name, stamped into operation log entries
    pub display_name: String,
    /// Actor's own email, fallback target for client notifications
    pub email: Option<String>,
    /// Configured junior's name (seniors only)
    pub junior_name: Option<String>,
    /// Configured junior's email (seniors only)
    pub junior_email: Option<String>,
    /// Workflow preferences
    pub preferences: ActorPreferences,
}

impl ActorContext {
    /// Build a normalized context
    ///
    /// Junior actors have their junior delegation fields stripped and the
    /// auto-assign preference cleared; the result is immutable thereafter.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        role: ActorRole,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            display_name: display_name.into(),
            email: None,
            junior_name: None,
            junior_email: None,
            preferences: ActorPreferences::default(),
        }
    }

    /// With the actor's own email
    #[inline]
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.normalized()
    }

    /// With a configured junior (ignored for junior actors)
    #[must_use]
    pub fn with_junior(
        mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.junior_name = Some(name.into());
        self.junior_email = Some(email.into());
        self.normalized()
    }

    /// With preferences (auto-assign cleared for junior actors)
    #[inline]
    #[must_use]
    pub fn with_preferences(mut self, preferences: ActorPreferences) -> Self {
        self.preferences = preferences;
        self.normalized()
    }

    /// Apply role constraints, producing the canonical form
    #[must_use]
    fn normalized(mut self) -> Self {
        if self.role == ActorRole::Junior {
            self.junior_name = None;
            self.junior_email = None;
            self.preferences.auto_assign_junior = false;
        }
        self
    }

    /// Whether this actor can delegate work to a junior
    #[inline]
    #[must_use]
    pub fn can_delegate(&self) -> bool {
        self.role == ActorRole::Senior
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn senior_keeps_junior_fields() {
        let actor = ActorContext::new("u-1", ActorRole::Senior, "Adv. Rao")
            .with_junior("Kiran", "kiran@firm.com");

        assert_eq!(actor.junior_name.as_deref(), Some("Kiran"));
        assert_eq!(actor.junior_email.as_deref(), Some("kiran@firm.com"));
        assert!(actor.can_delegate());
    }

    #[test]
    fn junior_fields_stripped_at_construction() {
        let actor = ActorContext::new("u-2", ActorRole::Junior, "Kiran")
            .with_junior("Someone", "someone@firm.com")
            .with_preferences(ActorPreferences {
                auto_assign_junior: true,
                ..ActorPreferences::default()
            });

        assert!(actor.junior_name.is_none());
        assert!(actor.junior_email.is_none());
        assert!(!actor.preferences.auto_assign_junior);
        assert!(!actor.can_delegate());
    }
}
