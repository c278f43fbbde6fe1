use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{decode, discriminator, RichText, Timestamp};
use crate::error::ApiError;

/// Every block tag this crate can decode.
///
/// Adding a tag means adding a variant here, and the exhaustive matches in
/// `from_tag` and `Block::from_value` will not compile until it is wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    ChildPage,
    Unsupported,
}

impl BlockType {
    pub const ALL: [BlockType; 10] = [
        BlockType::Paragraph,
        BlockType::Heading1,
        BlockType::Heading2,
        BlockType::Heading3,
        BlockType::BulletedListItem,
        BlockType::NumberedListItem,
        BlockType::ToDo,
        BlockType::Toggle,
        BlockType::ChildPage,
        BlockType::Unsupported,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "heading_1",
            BlockType::Heading2 => "heading_2",
            BlockType::Heading3 => "heading_3",
            BlockType::BulletedListItem => "bulleted_list_item",
            BlockType::NumberedListItem => "numbered_list_item",
            BlockType::ToDo => "to_do",
            BlockType::Toggle => "toggle",
            BlockType::ChildPage => "child_page",
            BlockType::Unsupported => "unsupported",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let block_type = match tag {
            "paragraph" => BlockType::Paragraph,
            "heading_1" => BlockType::Heading1,
            "heading_2" => BlockType::Heading2,
            "heading_3" => BlockType::Heading3,
            "bulleted_list_item" => BlockType::BulletedListItem,
            "numbered_list_item" => BlockType::NumberedListItem,
            "to_do" => BlockType::ToDo,
            "toggle" => BlockType::Toggle,
            "child_page" => BlockType::ChildPage,
            "unsupported" => BlockType::Unsupported,
            _ => return None,
        };
        Some(block_type)
    }
}

/// Payload shared by paragraphs, headings, list items and toggles.
///
/// Older API versions name the text field `text`, newer ones `rich_text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default, alias = "text")]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToDoBlock {
    #[serde(default, alias = "text")]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildPageBlock {
    #[serde(default)]
    pub title: String,
}

/// Type-specific part of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    ChildPage(ChildPageBlock),
    Unsupported,
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Paragraph(_) => BlockType::Paragraph,
            BlockContent::Heading1(_) => BlockType::Heading1,
            BlockContent::Heading2(_) => BlockType::Heading2,
            BlockContent::Heading3(_) => BlockType::Heading3,
            BlockContent::BulletedListItem(_) => BlockType::BulletedListItem,
            BlockContent::NumberedListItem(_) => BlockType::NumberedListItem,
            BlockContent::ToDo(_) => BlockType::ToDo,
            BlockContent::Toggle(_) => BlockType::Toggle,
            BlockContent::ChildPage(_) => BlockType::ChildPage,
            BlockContent::Unsupported => BlockType::Unsupported,
        }
    }

    /// Concatenated plain text, empty for blocks without text.
    pub fn plain_text(&self) -> String {
        let spans = match self {
            BlockContent::Paragraph(b)
            | BlockContent::Heading1(b)
            | BlockContent::Heading2(b)
            | BlockContent::Heading3(b)
            | BlockContent::BulletedListItem(b)
            | BlockContent::NumberedListItem(b)
            | BlockContent::Toggle(b) => &b.rich_text,
            BlockContent::ToDo(b) => &b.rich_text,
            BlockContent::ChildPage(b) => return b.title.clone(),
            BlockContent::Unsupported => return String::new(),
        };
        spans.iter().map(|s| s.plain_text.as_str()).collect()
    }
}

#[derive(Deserialize)]
struct BlockHeader {
    id: Uuid,
    created_time: Timestamp,
    last_edited_time: Timestamp,
    #[serde(default)]
    has_children: bool,
    #[serde(default)]
    archived: bool,
}

/// A content block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: Uuid,
    pub created_time: Timestamp,
    pub last_edited_time: Timestamp,
    pub has_children: bool,
    pub archived: bool,
    pub content: BlockContent,
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }

    /// Decode a block payload, selecting the content decoder from its `type`.
    pub fn from_value(value: &Value) -> Result<Self, ApiError> {
        let tag = discriminator(value, "type");
        let block_type = tag
            .and_then(BlockType::from_tag)
            .ok_or_else(|| ApiError::unknown_variant("block", tag))?;

        let header: BlockHeader = decode(value)?;
        let empty = Value::Object(Map::new());
        let payload = value.get(block_type.as_str()).unwrap_or(&empty);

        let content = match block_type {
            BlockType::Paragraph => BlockContent::Paragraph(decode(payload)?),
            BlockType::Heading1 => BlockContent::Heading1(decode(payload)?),
            BlockType::Heading2 => BlockContent::Heading2(decode(payload)?),
            BlockType::Heading3 => BlockContent::Heading3(decode(payload)?),
            BlockType::BulletedListItem => BlockContent::BulletedListItem(decode(payload)?),
            BlockType::NumberedListItem => BlockContent::NumberedListItem(decode(payload)?),
            BlockType::ToDo => BlockContent::ToDo(decode(payload)?),
            BlockType::Toggle => BlockContent::Toggle(decode(payload)?),
            BlockType::ChildPage => BlockContent::ChildPage(decode(payload)?),
            BlockType::Unsupported => BlockContent::Unsupported,
        };

        Ok(Block {
            id: header.id,
            created_time: header.created_time,
            last_edited_time: header.last_edited_time,
            has_children: header.has_children,
            archived: header.archived,
            content,
        })
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Block::from_value(&value).map_err(de::Error::custom)
    }
}
