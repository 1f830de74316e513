use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::storage::{
    KeyValueStore, CONVERSATION_ID_KEY, USER_EMAIL_KEY, USER_NAME_KEY, USER_PHONE_KEY,
};

/// Contact details sent along with every chat message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub session_id: String,
}

/// Partial profile update; empty or missing fields leave stored values alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfoUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UserInfoUpdate {
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.email, &self.phone]
            .iter()
            .all(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

/// Session manager owning the conversation id and the user profile
pub struct SessionManager {
    store: Box<dyn KeyValueStore>,
    conversation_id: String,
    user_info: UserInfo,
}

impl SessionManager {
    /// Load the session from `store`, creating a conversation id on first use
    pub fn new(mut store: Box<dyn KeyValueStore>) -> Result<Self> {
        let conversation_id = get_or_create_conversation_id(store.as_mut())?;
        let user_info = read_user_info(store.as_ref(), &conversation_id);

        Ok(Self {
            store,
            conversation_id,
            user_info,
        })
    }

    /// Conversation id; never changes for the lifetime of the store
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Current profile as sent to the backend
    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    /// Merge non-empty fields of `update` into the stored profile
    pub fn save_user_info(&mut self, update: &UserInfoUpdate) -> Result<()> {
        if let Some(name) = non_empty(&update.name) {
            self.store.set(USER_NAME_KEY, name)?;
            self.user_info.name = Some(name.to_string());
        }
        if let Some(email) = non_empty(&update.email) {
            self.store.set(USER_EMAIL_KEY, email)?;
            self.user_info.email = Some(email.to_string());
        }
        if let Some(phone) = non_empty(&update.phone) {
            self.store.set(USER_PHONE_KEY, phone)?;
            self.user_info.phone = Some(phone.to_string());
        }
        Ok(())
    }
}

/// Read the persisted conversation id, generating and storing one if absent
pub fn get_or_create_conversation_id(store: &mut dyn KeyValueStore) -> Result<String> {
    if let Some(existing) = store.get(CONVERSATION_ID_KEY).filter(|id| !id.is_empty()) {
        return Ok(existing);
    }

    let conversation_id = generate_conversation_id();
    store.set(CONVERSATION_ID_KEY, &conversation_id)?;
    tracing::info!(%conversation_id, "created new conversation id");
    Ok(conversation_id)
}

/// `conv_<unix millis>_<9 random chars>`
pub fn generate_conversation_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("conv_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}

fn read_user_info(store: &dyn KeyValueStore, conversation_id: &str) -> UserInfo {
    let field = |key: &str| store.get(key).filter(|value| !value.is_empty());
    UserInfo {
        name: field(USER_NAME_KEY),
        email: field(USER_EMAIL_KEY),
        phone: field(USER_PHONE_KEY),
        session_id: conversation_id.to_string(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};

    #[test]
    fn conversation_id_is_created_once_and_reused() {
        let mut store = MemoryStore::new();

        let first = get_or_create_conversation_id(&mut store).unwrap();
        let second = get_or_create_conversation_id(&mut store).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("conv_"));
        let suffix = first.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 9);
    }

    #[test]
    fn conversation_id_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let first = SessionManager::new(Box::new(FileStore::open(&path).unwrap())).unwrap();
        let id = first.conversation_id().to_string();
        drop(first);

        let second = SessionManager::new(Box::new(FileStore::open(&path).unwrap())).unwrap();
        assert_eq!(second.conversation_id(), id);
        assert_eq!(second.user_info().session_id, id);
    }

    #[test]
    fn save_user_info_only_touches_supplied_fields() {
        let mut store = MemoryStore::new();
        store.set(USER_NAME_KEY, "Priya").unwrap();
        store.set(USER_PHONE_KEY, "9876543210").unwrap();
        let mut session = SessionManager::new(Box::new(store)).unwrap();

        session
            .save_user_info(&UserInfoUpdate {
                email: Some("a@b.com".to_string()),
                ..Default::default()
            })
            .unwrap();

        let info = session.user_info();
        assert_eq!(info.email.as_deref(), Some("a@b.com"));
        assert_eq!(info.name.as_deref(), Some("Priya"));
        assert_eq!(info.phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn empty_fields_never_clear_stored_values() {
        let mut session = SessionManager::new(Box::new(MemoryStore::new())).unwrap();
        session
            .save_user_info(&UserInfoUpdate {
                name: Some("Priya".to_string()),
                ..Default::default()
            })
            .unwrap();

        let update = UserInfoUpdate {
            name: Some("  ".to_string()),
            email: Some(String::new()),
            phone: None,
        };
        assert!(update.is_empty());
        session.save_user_info(&update).unwrap();

        assert_eq!(session.user_info().name.as_deref(), Some("Priya"));
        assert!(session.user_info().email.is_none());
    }
}
