use crate::models::{Paste, PasteRef};

pub mod memory;
pub mod postgres;

#[allow(async_fn_in_trait)]
pub trait Storage {
    /// Insert a paste stamped with the current time.
    async fn insert_paste(
        &mut self,
        user_id: &str,
        paste: &str,
        paste_id: &str,
    ) -> crate::ApiResult<Paste>;

    /// Get the most recent paste of a user.
    async fn latest_paste(&mut self, user_id: &str) -> crate::ApiResult<Option<Paste>>;

    /// List a user's pastes, newest first.
    async fn list_pastes(&mut self, user_id: &str) -> crate::ApiResult<Vec<PasteRef>>;

    /// Get a paste by id, preferring the newest row owned by `user_id` when
    /// several rows share the id.
    async fn find_paste(&mut self, paste_id: &str, user_id: &str)
        -> crate::ApiResult<Option<Paste>>;

    /// Delete a user's pastes with the given id, returning how many went.
    async fn delete_paste(&mut self, paste_id: &str, user_id: &str) -> crate::ApiResult<u64>;

    /// Whether any paste has the given id.
    async fn paste_exists(&mut self, paste_id: &str) -> crate::ApiResult<bool>;
}

#[derive(Clone)]
pub enum AnyStorage {
    Postgres(postgres::PgStorage),
    Memory(memory::MemoryStorage),
}

impl Storage for AnyStorage {
    async fn insert_paste(
        &mut self,
        user_id: &str,
        paste: &str,
        paste_id: &str,
    ) -> crate::ApiResult<Paste> {
        match self {
            AnyStorage::Postgres(pg) => pg.insert_paste(user_id, paste, paste_id).await,
            AnyStorage::Memory(mem) => mem.insert_paste(user_id, paste, paste_id).await,
        }
    }

    async fn latest_paste(&mut self, user_id: &str) -> crate::ApiResult<Option<Paste>> {
        match self {
            AnyStorage::Postgres(pg) => pg.latest_paste(user_id).await,
            AnyStorage::Memory(mem) => mem.latest_paste(user_id).await,
        }
    }

    async fn list_pastes(&mut self, user_id: &str) -> crate::ApiResult<Vec<PasteRef>> {
        match self {
            AnyStorage::Postgres(pg) => pg.list_pastes(user_id).await,
            AnyStorage::Memory(mem) => mem.list_pastes(user_id).await,
        }
    }

    async fn find_paste(
        &mut self,
        paste_id: &str,
        user_id: &str,
    ) -> crate::ApiResult<Option<Paste>> {
        match self {
            AnyStorage::Postgres(pg) => pg.find_paste(paste_id, user_id).await,
            AnyStorage::Memory(mem) => mem.find_paste(paste_id, user_id).await,
        }
    }

    async fn delete_paste(&mut self, paste_id: &str, user_id: &str) -> crate::ApiResult<u64> {
        match self {
            AnyStorage::Postgres(pg) => pg.delete_paste(paste_id, user_id).await,
            AnyStorage::Memory(mem) => mem.delete_paste(paste_id, user_id).await,
        }
    }

    async fn paste_exists(&mut self, paste_id: &str) -> crate::ApiResult<bool> {
        match self {
            AnyStorage::Postgres(pg) => pg.paste_exists(paste_id).await,
            AnyStorage::Memory(mem) => mem.paste_exists(paste_id).await,
        }
    }
}

impl From<postgres::PgStorage> for AnyStorage {
    fn from(value: postgres::PgStorage) -> Self {
        AnyStorage::Postgres(value)
    }
}

impl From<memory::MemoryStorage> for AnyStorage {
    fn from(value: memory::MemoryStorage) -> Self {
        AnyStorage::Memory(value)
    }
}
