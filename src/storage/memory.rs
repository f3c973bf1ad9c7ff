use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::Storage;
use crate::models::{Paste, PasteRef};

/// In-process store with the same semantics as the postgres one.
///
/// Rows are kept in insertion order, which also breaks ties between equal
/// timestamps.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    rows: Arc<Mutex<Vec<Paste>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<Paste>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Index of the newest row matching `pred`.
fn newest(rows: &[Paste], pred: impl Fn(&Paste) -> bool) -> Option<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, p)| pred(*p))
        .max_by_key(|(i, p)| (p.time, *i))
        .map(|(i, _)| i)
}

impl Storage for MemoryStorage {
    async fn insert_paste(
        &mut self,
        user_id: &str,
        paste: &str,
        paste_id: &str,
    ) -> crate::ApiResult<Paste> {
        let row = Paste {
            user_id: user_id.to_owned(),
            paste: paste.to_owned(),
            paste_id: paste_id.to_owned(),
            time: Utc::now(),
        };
        self.rows().push(row.clone());
        Ok(row)
    }

    async fn latest_paste(&mut self, user_id: &str) -> crate::ApiResult<Option<Paste>> {
        let rows = self.rows();
        Ok(newest(&rows, |p| p.user_id == user_id).map(|i| rows[i].clone()))
    }

    async fn list_pastes(&mut self, user_id: &str) -> crate::ApiResult<Vec<PasteRef>> {
        let rows = self.rows();
        let mut owned: Vec<(usize, &Paste)> = rows
            .iter()
            .enumerate()
            .filter(|(_, p)| p.user_id == user_id)
            .collect();
        owned.sort_by(|(ia, a), (ib, b)| (b.time, ib).cmp(&(a.time, ia)));
        Ok(owned
            .into_iter()
            .map(|(_, p)| PasteRef {
                user_id: p.user_id.clone(),
                paste_id: p.paste_id.clone(),
            })
            .collect())
    }

    async fn find_paste(
        &mut self,
        paste_id: &str,
        user_id: &str,
    ) -> crate::ApiResult<Option<Paste>> {
        let rows = self.rows();
        let index = newest(&rows, |p| p.paste_id == paste_id && p.user_id == user_id)
            .or_else(|| newest(&rows, |p| p.paste_id == paste_id));
        Ok(index.map(|i| rows[i].clone()))
    }

    async fn delete_paste(&mut self, paste_id: &str, user_id: &str) -> crate::ApiResult<u64> {
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|p| !(p.paste_id == paste_id && p.user_id == user_id));
        Ok((before - rows.len()) as u64)
    }

    async fn paste_exists(&mut self, paste_id: &str) -> crate::ApiResult<bool> {
        Ok(self.rows().iter().any(|p| p.paste_id == paste_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn latest_and_listing_are_newest_first() {
        let mut storage = MemoryStorage::new();
        storage.insert_paste("u", "one", "1").await.unwrap();
        storage.insert_paste("u", "two", "2").await.unwrap();
        storage.insert_paste("other", "three", "3").await.unwrap();

        let latest = storage.latest_paste("u").await.unwrap().unwrap();
        assert_eq!(latest.paste, "two");

        let ids: Vec<_> = storage
            .list_pastes("u")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.paste_id)
            .collect();
        assert_eq!(ids, ["2", "1"]);

        assert!(storage.latest_paste("nobody").await.unwrap().is_none());
        assert!(storage.list_pastes("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_prefers_own_row() {
        let mut storage = MemoryStorage::new();
        storage.insert_paste("a", "same", "s").await.unwrap();
        storage.insert_paste("b", "same", "s").await.unwrap();

        let found = storage.find_paste("s", "a").await.unwrap().unwrap();
        assert_eq!(found.user_id, "a");

        let found = storage.find_paste("s", "c").await.unwrap().unwrap();
        assert_eq!(found.user_id, "b");

        assert!(storage.find_paste("missing", "a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_only_touches_owner_rows() {
        let mut storage = MemoryStorage::new();
        storage.insert_paste("a", "same", "s").await.unwrap();
        storage.insert_paste("b", "same", "s").await.unwrap();

        assert_eq!(storage.delete_paste("s", "c").await.unwrap(), 0);
        assert_eq!(storage.delete_paste("s", "a").await.unwrap(), 1);
        assert!(storage.paste_exists("s").await.unwrap());
        assert_eq!(storage.delete_paste("s", "b").await.unwrap(), 1);
        assert!(!storage.paste_exists("s").await.unwrap());
    }

    #[tokio::test]
    async fn clones_share_rows() {
        let mut a = MemoryStorage::new();
        let mut b = a.clone();
        a.insert_paste("u", "hi", "h").await.unwrap();
        assert!(b.paste_exists("h").await.unwrap());
    }
}
