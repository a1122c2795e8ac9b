//! Signed-in user, as far as the notification center cares

/// Identity supplied by the session provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Local part of the email ("maria" for "maria@voxa.app")
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}
