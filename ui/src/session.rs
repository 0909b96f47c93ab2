//! The signed-in admin's session and its persistence in local storage.
//!
//! The session is read from storage once at startup and afterwards only
//! lives in the global [`State`](crate::State); everything else receives it
//! explicitly.

use anyhow::{Context, anyhow};
use payloads::responses::AdminProfile;
use serde::{Deserialize, Serialize};

pub const TOKEN_KEY: &str = "adminToken";
pub const PROFILE_KEY: &str = "adminData";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub admin: AdminProfile,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[redacted]")
            .field("admin", &self.admin)
            .finish()
    }
}

impl Session {
    /// Rebuild a session from the two stored values. Both must be present
    /// for a session to exist.
    pub fn from_stored(
        token: Option<String>,
        profile: Option<String>,
    ) -> anyhow::Result<Option<Session>> {
        let (Some(token), Some(profile)) = (token, profile) else {
            return Ok(None);
        };
        if token.trim().is_empty() {
            return Ok(None);
        }
        let admin = serde_json::from_str(&profile)
            .context("stored admin profile is not valid JSON")?;
        Ok(Some(Session { token, admin }))
    }
}

fn local_storage() -> anyhow::Result<web_sys::Storage> {
    web_sys::window()
        .context("no window")?
        .local_storage()
        .map_err(|e| anyhow!("local storage unavailable: {e:?}"))?
        .context("local storage disabled")
}

/// Load the persisted session, if any.
pub fn load() -> anyhow::Result<Option<Session>> {
    let storage = local_storage()?;
    let read = |key: &str| {
        storage
            .get_item(key)
            .map_err(|e| anyhow!("failed to read {key}: {e:?}"))
    };
    Session::from_stored(read(TOKEN_KEY)?, read(PROFILE_KEY)?)
}

pub fn persist(session: &Session) -> anyhow::Result<()> {
    let storage = local_storage()?;
    let profile = serde_json::to_string(&session.admin)?;
    storage
        .set_item(TOKEN_KEY, &session.token)
        .and_then(|_| storage.set_item(PROFILE_KEY, &profile))
        .map_err(|e| anyhow!("failed to store session: {e:?}"))
}

pub fn clear() -> anyhow::Result<()> {
    let storage = local_storage()?;
    storage
        .remove_item(TOKEN_KEY)
        .and_then(|_| storage.remove_item(PROFILE_KEY))
        .map_err(|e| anyhow!("failed to clear session: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str =
        r#"{"_id": "a1", "name": "Asha", "email": "asha@mocktale.in"}"#;

    #[test]
    fn both_keys_are_needed() {
        assert!(
            Session::from_stored(Some("t".into()), None)
                .unwrap()
                .is_none()
        );
        assert!(
            Session::from_stored(None, Some(PROFILE.into()))
                .unwrap()
                .is_none()
        );
        assert!(
            Session::from_stored(Some("  ".into()), Some(PROFILE.into()))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn stored_values_rebuild_the_session() {
        let session =
            Session::from_stored(Some("s3cr3t-value".into()), Some(PROFILE.into()))
                .unwrap()
                .unwrap();
        assert_eq!(session.token, "s3cr3t-value");
        assert_eq!(session.admin.name, "Asha");
        let debug = format!("{session:?}");
        assert!(!debug.contains("s3cr3t-value"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn corrupt_profile_is_an_error() {
        assert!(
            Session::from_stored(Some("tok".into()), Some("{".into())).is_err()
        );
    }
}
