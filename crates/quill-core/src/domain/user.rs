use serde::{Deserialize, Serialize};

use super::avatar::AvatarColor;

/// Identity of a signed-in user as exposed by the account directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
        }
    }

    /// Upper-cased first letter of the display name, falling back to the e-mail.
    pub fn initial(&self) -> Option<char> {
        self.display_name
            .as_deref()
            .and_then(|name| name.chars().next())
            .or_else(|| self.email.chars().next())
            .and_then(|c| c.to_uppercase().next())
    }

    /// Avatar color keyed on the e-mail, or the uid when the e-mail is empty.
    pub fn avatar_color(&self) -> AvatarColor {
        if self.email.is_empty() {
            AvatarColor::for_value(&self.uid)
        } else {
            AvatarColor::for_value(&self.email)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_prefers_display_name() {
        let mut identity = Identity::new("u1", "zoe@example.com");
        assert_eq!(identity.initial(), Some('Z'));

        identity.display_name = Some("ada".to_string());
        assert_eq!(identity.initial(), Some('A'));

        identity.display_name = Some(String::new());
        assert_eq!(identity.initial(), Some('Z'));
    }

    #[test]
    fn test_avatar_color_falls_back_to_uid() {
        let identity = Identity::new("abc", "");
        assert_eq!(identity.avatar_color(), AvatarColor::for_value("abc"));
    }
}
