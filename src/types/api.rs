use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Key;
use crate::models::{Paste, PasteRef};

/// Selects every paste of a user in a read request.
pub const ALL_PASTES: &str = "ALL";

#[derive(Debug, Deserialize)]
pub struct CreatePaste {
    pub user_id: Value,
    pub paste: String,
}

#[derive(Debug, Deserialize)]
pub struct ReadPaste {
    pub user_id: Key,
    #[serde(default)]
    pub paste_id: Option<Key>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePaste {
    pub user_id: Key,
    pub paste_id: Key,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPaste {
    pub user_id: String,
    pub paste_id: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteContent {
    pub user_id: String,
    pub paste: String,
}

impl From<Paste> for PasteContent {
    fn from(paste: Paste) -> Self {
        PasteContent {
            user_id: paste.user_id,
            paste: paste.paste,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteEntry {
    pub user_id: String,
    pub paste_id: String,
}

impl From<PasteRef> for PasteEntry {
    fn from(paste: PasteRef) -> Self {
        PasteEntry {
            user_id: paste.user_id,
            paste_id: paste.paste_id,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReadResult {
    Paste(PasteContent),
    List(Vec<PasteEntry>),
}
