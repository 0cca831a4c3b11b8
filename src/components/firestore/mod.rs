mod actor;
pub mod models;

pub use actor::{FirestoreActor, FirestoreActorHandle};
pub use models::{CalendarEvent, UserRecord};

use crate::error::AppResult;
use async_trait::async_trait;

/// Read access to user records and their delivery tokens
#[async_trait]
pub trait UserTokenStore: Send + Sync {
    /// Get a user record by id; `None` when the document does not exist
    async fn get_user(&self, user_id: &str) -> AppResult<Option<UserRecord>>;
}

#[async_trait]
impl UserTokenStore for FirestoreActorHandle {
    async fn get_user(&self, user_id: &str) -> AppResult<Option<UserRecord>> {
        FirestoreActorHandle::get_user(self, user_id).await
    }
}
