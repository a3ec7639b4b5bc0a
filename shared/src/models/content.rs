//! Content Model
//!
//! A content row attaches one item to a module at a position. Items are
//! a closed set of payload types expressed as a tagged union: the JSON
//! carries a `type` field next to the item fields.

use serde::{Deserialize, Serialize};

/// Fields shared by every item type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ItemBase {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Text item: inline body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TextItem {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub base: ItemBase,
    pub body: String,
}

/// File item: link to a downloadable file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FileItem {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub base: ItemBase,
    pub file_url: String,
}

/// Image item: link to a displayed image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ImageItem {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub base: ItemBase,
    pub file_url: String,
}

/// Video item: embed URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VideoItem {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub base: ItemBase,
    pub url: String,
}

/// A resolved item, tagged by type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Text(TextItem),
    File(FileItem),
    Image(ImageItem),
    Video(VideoItem),
}

impl ContentItem {
    /// Discriminator string as stored in the database
    pub fn item_type(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::File(_) => "file",
            Self::Image(_) => "image",
            Self::Video(_) => "video",
        }
    }

    /// Shared base fields of the item
    pub fn base(&self) -> &ItemBase {
        match self {
            Self::Text(i) => &i.base,
            Self::File(i) => &i.base,
            Self::Image(i) => &i.base,
            Self::Video(i) => &i.base,
        }
    }

    pub fn title(&self) -> &str {
        &self.base().title
    }
}

/// Content row with its item resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentWithItem {
    pub id: i64,
    pub module_id: i64,
    /// Position within the module, assigned automatically when omitted
    pub sort_order: i64,
    pub item: ContentItem,
}

/// New item payload, tagged by type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItemCreate {
    Text { title: String, body: String },
    File { title: String, file_url: String },
    Image { title: String, file_url: String },
    Video { title: String, url: String },
}

impl ContentItemCreate {
    pub fn item_type(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::File { .. } => "file",
            Self::Image { .. } => "image",
            Self::Video { .. } => "video",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Text { title, .. }
            | Self::File { title, .. }
            | Self::Image { title, .. }
            | Self::Video { title, .. } => title,
        }
    }
}

/// Create content payload: the item fields plus an optional position
///
/// When `sort_order` is omitted the content is appended after the
/// current highest position in its module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCreate {
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(flatten)]
    pub item: ContentItemCreate,
}

/// Update content payload
///
/// The item type is immutable; only the payload field matching the
/// stored type is applied, the others are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub file_url: Option<String>,
    pub url: Option<String>,
}
