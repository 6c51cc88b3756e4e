//! Typed block content.
//!
//! Blocks arrive from the CMS as `{block_type, order, content}` where
//! `content` is a loosely shaped JSON mapping. This module validates that
//! mapping once, at the boundary, into a [`BlockContent`] variant carrying a
//! kind-specific struct. Every field is optional and has a documented
//! default, so partially authored content always renders.
//!
//! | Kind | Fields (default) |
//! |------|------------------|
//! | `hero` | `title` (""), `subtitle`, `background_image`, `cta_text`, `cta_url` ("#") |
//! | `article`, `text` | `title`, `text` ("") |
//! | `image` | `url` (""), `alt` (""), `caption` |
//! | `text_image` | `title`, `text`, `image_url`, `image_alt`, `image_position` (left), `image_size` (medium) |
//! | `gallery` | `images`: `[{url, alt}]` |
//! | `cta` | `title`, `description`, `buttons`: `[{text, url ("#"), style ("primary")}]`, `background_color`, `text_color` |
//! | `faq` | `title`, `items`: `[{question, answer}]` |
//!
//! `null` is treated the same as a missing key. Fields that toggle markup
//! (titles, captions, CTA text) also treat an empty string as missing.
//! A present field of the wrong JSON type is a [`BlockError`].

use crate::types::Block;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_LINK_URL: &str = "#";
pub const DEFAULT_BUTTON_STYLE: &str = "primary";
pub const DEFAULT_CTA_BACKGROUND: &str = "#f8f9fa";
pub const DEFAULT_CTA_TEXT_COLOR: &str = "#212529";

#[derive(Error, Debug)]
pub enum BlockError {
    #[error("`{block_type}` block content must be an object, found {found}")]
    NotAnObject {
        block_type: String,
        found: &'static str,
    },
    #[error("invalid `{block_type}` block content: {source}")]
    InvalidContent {
        block_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The fixed set of block kinds the renderer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Hero,
    Article,
    Text,
    Image,
    TextImage,
    Gallery,
    Cta,
    Faq,
}

impl BlockKind {
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Hero,
        BlockKind::Article,
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::TextImage,
        BlockKind::Gallery,
        BlockKind::Cta,
        BlockKind::Faq,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::Article => "article",
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::TextImage => "text_image",
            BlockKind::Gallery => "gallery",
            BlockKind::Cta => "cta",
            BlockKind::Faq => "faq",
        }
    }

    /// Look up a kind by its stored `block_type` string.
    pub fn from_type(block_type: &str) -> Option<BlockKind> {
        BlockKind::ALL.into_iter().find(|k| k.as_str() == block_type)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated content of a single block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Hero(HeroContent),
    Article(TextContent),
    Text(TextContent),
    Image(ImageContent),
    TextImage(TextImageContent),
    Gallery(GalleryContent),
    Cta(CtaContent),
    Faq(FaqContent),
    /// A `block_type` outside the known set. Renders nothing.
    Unknown(String),
}

impl BlockContent {
    /// Validate raw `content` for the given `block_type`.
    pub fn parse(block_type: &str, content: &Value) -> Result<Self, BlockError> {
        let Some(kind) = BlockKind::from_type(block_type) else {
            return Ok(BlockContent::Unknown(block_type.to_string()));
        };
        Ok(match kind {
            BlockKind::Hero => BlockContent::Hero(decode(kind, content)?),
            BlockKind::Article => BlockContent::Article(decode(kind, content)?),
            BlockKind::Text => BlockContent::Text(decode(kind, content)?),
            BlockKind::Image => BlockContent::Image(decode(kind, content)?),
            BlockKind::TextImage => BlockContent::TextImage(decode(kind, content)?),
            BlockKind::Gallery => BlockContent::Gallery(decode(kind, content)?),
            BlockKind::Cta => BlockContent::Cta(decode(kind, content)?),
            BlockKind::Faq => BlockContent::Faq(decode(kind, content)?),
        })
    }

    pub fn from_block(block: &Block) -> Result<Self, BlockError> {
        Self::parse(&block.block_type, &block.content)
    }

    /// `None` for [`BlockContent::Unknown`].
    pub fn kind(&self) -> Option<BlockKind> {
        match self {
            BlockContent::Hero(_) => Some(BlockKind::Hero),
            BlockContent::Article(_) => Some(BlockKind::Article),
            BlockContent::Text(_) => Some(BlockKind::Text),
            BlockContent::Image(_) => Some(BlockKind::Image),
            BlockContent::TextImage(_) => Some(BlockKind::TextImage),
            BlockContent::Gallery(_) => Some(BlockKind::Gallery),
            BlockContent::Cta(_) => Some(BlockKind::Cta),
            BlockContent::Faq(_) => Some(BlockKind::Faq),
            BlockContent::Unknown(_) => None,
        }
    }
}

fn decode<T: DeserializeOwned + Default>(kind: BlockKind, content: &Value) -> Result<T, BlockError> {
    match content {
        Value::Null => Ok(T::default()),
        Value::Object(_) => T::deserialize(content).map_err(|source| BlockError::InvalidContent {
            block_type: kind.as_str().to_string(),
            source,
        }),
        other => Err(BlockError::NotAnObject {
            block_type: kind.as_str().to_string(),
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `null` deserializes to `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Case-insensitive choice; unrecognized values fall back to the default.
fn lenient_choice<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().to_ascii_lowercase().parse().ok())
        .unwrap_or_default())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    non_empty(value).unwrap_or(default)
}

// ============================================================================
// Per-kind content
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub background_image: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
}

/// A link button: visible text plus target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallToAction<'a> {
    pub text: &'a str,
    pub url: &'a str,
}

impl HeroContent {
    pub fn title(&self) -> &str {
        or_empty(&self.title)
    }

    pub fn subtitle(&self) -> Option<&str> {
        non_empty(&self.subtitle)
    }

    pub fn background_image(&self) -> Option<&str> {
        non_empty(&self.background_image)
    }

    /// Present only when `cta_text` is.
    pub fn call_to_action(&self) -> Option<CallToAction<'_>> {
        non_empty(&self.cta_text).map(|text| CallToAction {
            text,
            url: or_default(&self.cta_url, DEFAULT_LINK_URL),
        })
    }
}

/// Shared by `article` and `text` blocks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub title: Option<String>,
    pub text: Option<String>,
}

impl TextContent {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn text(&self) -> &str {
        or_empty(&self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    pub url: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

impl ImageContent {
    pub fn url(&self) -> &str {
        or_empty(&self.url)
    }

    pub fn alt(&self) -> &str {
        or_empty(&self.alt)
    }

    pub fn caption(&self) -> Option<&str> {
        non_empty(&self.caption)
    }
}

/// Where the image sits relative to the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImagePosition {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl ImagePosition {
    /// Flex direction that places the image (first child) on this side.
    pub fn flex_direction(self) -> &'static str {
        match self {
            ImagePosition::Left => "row",
            ImagePosition::Right => "row-reverse",
            ImagePosition::Top => "column",
            ImagePosition::Bottom => "column-reverse",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImagePosition::Left => "left",
            ImagePosition::Right => "right",
            ImagePosition::Top => "top",
            ImagePosition::Bottom => "bottom",
        }
    }
}

impl FromStr for ImagePosition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(ImagePosition::Left),
            "right" => Ok(ImagePosition::Right),
            "top" => Ok(ImagePosition::Top),
            "bottom" => Ok(ImagePosition::Bottom),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ImageSize {
    /// Share of the block width given to the image.
    pub fn width(self) -> &'static str {
        match self {
            ImageSize::Small => "33%",
            ImageSize::Medium => "50%",
            ImageSize::Large => "66%",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
        }
    }
}

impl FromStr for ImageSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(ImageSize::Small),
            "medium" => Ok(ImageSize::Medium),
            "large" => Ok(ImageSize::Large),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextImageContent {
    pub title: Option<String>,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    #[serde(deserialize_with = "lenient_choice")]
    pub image_position: ImagePosition,
    #[serde(deserialize_with = "lenient_choice")]
    pub image_size: ImageSize,
}

impl TextImageContent {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn text(&self) -> &str {
        or_empty(&self.text)
    }

    pub fn image_url(&self) -> &str {
        or_empty(&self.image_url)
    }

    pub fn image_alt(&self) -> &str {
        or_empty(&self.image_alt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryContent {
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryImage {
    pub url: Option<String>,
    pub alt: Option<String>,
}

impl GalleryImage {
    pub fn url(&self) -> &str {
        or_empty(&self.url)
    }

    pub fn alt(&self) -> &str {
        or_empty(&self.alt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CtaContent {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub buttons: Vec<CtaButton>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

impl CtaContent {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn background_color(&self) -> &str {
        or_default(&self.background_color, DEFAULT_CTA_BACKGROUND)
    }

    pub fn text_color(&self) -> &str {
        or_default(&self.text_color, DEFAULT_CTA_TEXT_COLOR)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CtaButton {
    pub text: Option<String>,
    pub url: Option<String>,
    pub style: Option<String>,
}

impl CtaButton {
    pub fn text(&self) -> &str {
        or_empty(&self.text)
    }

    pub fn url(&self) -> &str {
        or_default(&self.url, DEFAULT_LINK_URL)
    }

    pub fn style(&self) -> &str {
        or_default(&self.style, DEFAULT_BUTTON_STYLE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaqContent {
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<FaqItem>,
}

impl FaqContent {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl FaqItem {
    pub fn question(&self) -> &str {
        or_empty(&self.question)
    }

    pub fn answer(&self) -> &str {
        or_empty(&self.answer)
    }
}
