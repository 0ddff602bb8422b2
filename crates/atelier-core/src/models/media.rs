//! Media items attached to artworks and projects
//!
//! `MediaItem` is a closed union keyed by `_type`. Each variant carries exactly
//! one payload: an image, an uploaded video file, or an external video id.

use serde::{Deserialize, Serialize};

use super::common::{FileAsset, Image};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMedia {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub image: Image,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMedia {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub video: FileAsset,
    pub caption: Option<String>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VimeoMedia {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub vimeo_id: String,
    pub caption: Option<String>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeMedia {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub youtube_id: String,
    pub caption: Option<String>,
    pub is_primary: Option<bool>,
}

/// One entry of a media list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum MediaItem {
    #[serde(rename = "imageMedia")]
    Image(ImageMedia),
    #[serde(rename = "videoMedia")]
    Video(VideoMedia),
    #[serde(rename = "vimeoMedia")]
    Vimeo(VimeoMedia),
    #[serde(rename = "youtubeMedia")]
    Youtube(YoutubeMedia),
    /// A media type this version does not know; its payload is dropped
    #[serde(other)]
    Unknown,
}

impl MediaItem {
    pub fn is_image(&self) -> bool {
        matches!(self, MediaItem::Image(_))
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaItem::Video(_))
    }

    pub fn is_vimeo(&self) -> bool {
        matches!(self, MediaItem::Vimeo(_))
    }

    pub fn is_youtube(&self) -> bool {
        matches!(self, MediaItem::Youtube(_))
    }

    /// The `_type` discriminator
    pub fn kind(&self) -> &'static str {
        match self {
            MediaItem::Image(_) => "imageMedia",
            MediaItem::Video(_) => "videoMedia",
            MediaItem::Vimeo(_) => "vimeoMedia",
            MediaItem::Youtube(_) => "youtubeMedia",
            MediaItem::Unknown => "unknown",
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            MediaItem::Image(m) => m.caption.as_deref(),
            MediaItem::Video(m) => m.caption.as_deref(),
            MediaItem::Vimeo(m) => m.caption.as_deref(),
            MediaItem::Youtube(m) => m.caption.as_deref(),
            MediaItem::Unknown => None,
        }
    }

    /// Advisory flag; more than one item in a list may carry it
    pub fn is_primary(&self) -> bool {
        let flag = match self {
            MediaItem::Image(m) => m.is_primary,
            MediaItem::Video(m) => m.is_primary,
            MediaItem::Vimeo(m) => m.is_primary,
            MediaItem::Youtube(m) => m.is_primary,
            MediaItem::Unknown => None,
        };
        flag.unwrap_or(false)
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            MediaItem::Image(m) => Some(&m.image),
            _ => None,
        }
    }
}

/// The item to feature for a media list: the first flagged primary, else the
/// first item of a known type
pub fn primary_media(items: &[MediaItem]) -> Option<&MediaItem> {
    items
        .iter()
        .find(|m| m.is_primary())
        .or_else(|| items.iter().find(|m| !matches!(m, MediaItem::Unknown)))
}
