//! User Identity
//!
//! Read-only copy of the signed-in user as reported by the identity provider.

use serde::{Deserialize, Serialize};

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Provider-assigned unique identifier
    pub uid: String,
    /// Display name, if the provider has one
    #[serde(default)]
    pub display_name: Option<String>,
    /// Email address (empty when the provider withheld it)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserIdentity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: email.into(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name shown in greetings: display name, falling back to email
    pub fn greeting_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    /// Identities without an email cannot author or own items
    pub fn can_author(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

/// An author entry in the roster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub email: String,
    pub display_name: Option<String>,
}

impl Author {
    /// Label for the "filter by user" selector
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_falls_back_to_email() {
        let user = UserIdentity::new("u1", "ana@example.com");
        assert_eq!(user.greeting_name(), "ana@example.com");

        let named = user.with_display_name("Ana");
        assert_eq!(named.greeting_name(), "Ana");
    }

    #[test]
    fn test_blank_email_cannot_author() {
        assert!(!UserIdentity::new("u1", "  ").can_author());
        assert!(UserIdentity::new("u1", "a@b.c").can_author());
    }

    #[test]
    fn test_identity_deserializes_provider_shape() {
        let user: UserIdentity = serde_json::from_str(
            r#"{"uid":"abc","displayName":"Bo","email":"bo@example.com"}"#,
        )
        .unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Bo"));

        let anonymous: UserIdentity = serde_json::from_str(r#"{"uid":"x","displayName":null,"email":null}"#).unwrap();
        assert_eq!(anonymous.email, "");
    }
}
