use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR_URL: &str = "https://i.pravatar.cc/100";
pub const ANONYMOUS: &str = "Anonymous";

/// The account of a signed-in user, as reported by the auth provider.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
}

impl User {
    pub fn new<S: Into<String>>(uid: S) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }
}

/// The user's stored profile document, which may override the account's name and photo.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Who is using the app right now.
///
/// Passed explicitly to every operation that cares about the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    profile: Option<Profile>,
}

impl Session {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn uid(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.uid.as_str())
    }

    /// Profile name, then account display name, then "Anonymous".
    pub fn author_name(&self) -> String {
        first_filled(&[
            self.profile.as_ref().and_then(|p| p.name.as_deref()),
            self.user.as_ref().and_then(|u| u.display_name.as_deref()),
        ])
        .unwrap_or(ANONYMOUS)
        .to_string()
    }

    /// Profile photo, then account photo, then the default avatar.
    pub fn author_photo(&self) -> String {
        first_filled(&[
            self.profile.as_ref().and_then(|p| p.photo_url.as_deref()),
            self.user.as_ref().and_then(|u| u.photo_url.as_deref()),
        ])
        .unwrap_or(DEFAULT_AVATAR_URL)
        .to_string()
    }
}

fn first_filled<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{Profile, Session, User, DEFAULT_AVATAR_URL};

    #[test]
    fn test_author_fallbacks() {
        let anonymous = Session::signed_in(User::new("u1"));
        assert_eq!(anonymous.author_name(), "Anonymous");
        assert_eq!(anonymous.author_photo(), DEFAULT_AVATAR_URL);

        let account = Session::signed_in(User {
            uid: "u2".into(),
            display_name: Some("Asha".into()),
            photo_url: Some("https://photos.example/asha.png".into()),
        });
        assert_eq!(account.author_name(), "Asha");
        assert_eq!(account.author_photo(), "https://photos.example/asha.png");

        let profiled = account.with_profile(Profile {
            name: Some("Asha K".into()),
            photo_url: Some("".into()),
        });
        assert_eq!(profiled.author_name(), "Asha K");
        /* blank profile photo falls through to the account photo */
        assert_eq!(profiled.author_photo(), "https://photos.example/asha.png");
    }

    #[test]
    fn test_signed_out() {
        let session = Session::default();
        assert!(session.user().is_none());
        assert_eq!(session.uid(), None);
    }
}
