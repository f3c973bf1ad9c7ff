use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Paste {
    pub user_id: String,
    pub paste: String,
    pub paste_id: String,
    pub time: DateTime<Utc>,
}

/// Owner and id of a paste, without its contents.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PasteRef {
    pub user_id: String,
    pub paste_id: String,
}
