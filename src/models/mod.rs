use serde::{Deserialize, Deserializer, Serialize};

/// Title of the entry a fresh store starts with.
pub(crate) const UNTITLED_TITLE: &str = "Untitled";

/// Title used for entries created from the client.
pub(crate) const NEW_JOURNAL_TITLE: &str = "New journal";

/// Backend sometimes sends `null` for fields we treat as plain values.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JournalEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_list: Vec<Media>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl JournalEntry {
    pub fn with_title(title: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            content: String::new(),
            media_list: vec![],
            updated_at: None,
        }
    }
}

impl Default for JournalEntry {
    fn default() -> Self {
        Self::with_title(UNTITLED_TITLE)
    }
}

/// Body of `POST /travel-journals`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewJournal {
    pub title: String,
    pub content: String,
    pub media_list: Vec<Media>,
}

impl Default for NewJournal {
    fn default() -> Self {
        Self {
            title: NEW_JOURNAL_TITLE.to_string(),
            content: String::new(),
            media_list: vec![],
        }
    }
}

/// Media reference attached to a journal entry.
///
/// Fields we do not model are kept in `extra` so a later PUT of the entry
/// sends them back untouched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub(crate) struct Media {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Guess from a browser-reported MIME type; anything not `video/*` is an image.
    pub fn from_mime(mime: &str) -> Self {
        if mime.trim().to_ascii_lowercase().starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// A file picked in the browser, already read into memory.
#[derive(Clone, Debug)]
pub(crate) struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersonalInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signature: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub like_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub travel_check_in_count: i64,
}
