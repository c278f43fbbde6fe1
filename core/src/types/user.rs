use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{decode, discriminator};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserType {
    Bot,
    Person,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Bot => "bot",
            UserType::Person => "person",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "bot" => Some(UserType::Bot),
            "person" => Some(UserType::Person),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonDetails {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonUser {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub person: PersonDetails,
}

/// An integration. The `bot` object is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotUser {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bot: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum User {
    Bot(BotUser),
    Person(PersonUser),
}

impl User {
    /// Decode a user payload, selecting the variant from its `type`.
    pub fn from_value(value: &Value) -> Result<Self, ApiError> {
        let tag = discriminator(value, "type");
        match tag.and_then(UserType::from_tag) {
            Some(UserType::Bot) => Ok(User::Bot(decode(value)?)),
            Some(UserType::Person) => Ok(User::Person(decode(value)?)),
            None => Err(ApiError::unknown_variant("user", tag)),
        }
    }

    pub fn user_type(&self) -> UserType {
        match self {
            User::Bot(_) => UserType::Bot,
            User::Person(_) => UserType::Person,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            User::Bot(u) => u.id,
            User::Person(u) => u.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            User::Bot(u) => u.name.as_deref(),
            User::Person(u) => u.name.as_deref(),
        }
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        User::from_value(&value).map_err(de::Error::custom)
    }
}
