use crate::model::session::AuthUser;

use super::storage::{LocalStorage, StorageError};

/// Storage key holding the serialized signed-in user
pub const SESSION_KEY: &str = "user";

/// Read the stored session. Anything unreadable counts as signed out.
pub fn load_session(storage: &LocalStorage) -> Option<AuthUser> {
    let raw = match storage.get_item(SESSION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "could not read session storage");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed stored session");
            None
        }
    }
}

pub fn save_session(storage: &LocalStorage, user: &AuthUser) -> Result<(), StorageError> {
    let raw = serde_json::to_string(user)?;
    storage.set_item(SESSION_KEY, &raw)
}

pub fn clear_session(storage: &LocalStorage) -> Result<(), StorageError> {
    storage.remove_item(SESSION_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::Role;
    use tempfile::TempDir;

    fn user() -> AuthUser {
        AuthUser {
            id: 7,
            email: "ann@example.com".into(),
            name: "Ann".into(),
            role: Role::Admin,
            token: Some("abc".into()),
        }
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        assert_eq!(load_session(&storage), None);
        save_session(&storage, &user()).unwrap();
        assert_eq!(load_session(&storage), Some(user()));
    }

    #[test]
    fn clear_removes_session() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        save_session(&storage, &user()).unwrap();
        clear_session(&storage).unwrap();
        assert_eq!(load_session(&storage), None);
    }

    #[test]
    fn malformed_value_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        storage.set_item(SESSION_KEY, "{\"id\": \"seven\"}").unwrap();
        assert_eq!(load_session(&storage), None);
    }
}
