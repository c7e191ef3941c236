//! Reaction objects attached to messages.

use serde_json::Value;

use crate::error::SchemaViolation;
use crate::wire::{Field, Object, ObjectBuilder, Snowflake, Wire};

/// An emoji reaction tally on a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    /// How many accounts reacted with this emoji.
    pub count: u32,
    /// Whether the current account is among them.
    pub me: bool,
    pub emoji: Emoji,
}

impl Wire for Reaction {
    const ENTITY: &'static str = "Reaction";
    const FIELDS: &'static [Field] = &[
        Field::required("count", "count"),
        Field::optional("me", "me"),
        Field::required("emoji", "emoji"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            count: obj.req_u32("count")?,
            me: obj.flag("me")?,
            emoji: obj.req_entity("emoji")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set("count", self.count)
            .set("me", self.me)
            .set_entity("emoji", Some(&self.emoji))
            .build()
    }
}

/// Partial emoji carried inside a reaction.
///
/// Unicode emoji have a `name` and no `id`; custom emoji have both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emoji {
    pub id: Option<Snowflake>,
    pub name: Option<String>,
}

impl Wire for Emoji {
    const ENTITY: &'static str = "Emoji";
    const FIELDS: &'static [Field] = &[
        Field::optional("id", "id"),
        Field::optional("name", "name"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            id: obj.opt_str("id")?,
            name: obj.opt_str("name")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set_opt("id", self.id.as_deref())
            .set_opt("name", self.name.as_deref())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reaction_with_unicode_emoji() {
        let reaction = Reaction::decode(&json!({
            "count": 3,
            "me": true,
            "emoji": {"id": null, "name": "🔥"}
        }))
        .unwrap();
        assert_eq!(reaction.count, 3);
        assert!(reaction.me);
        assert!(reaction.emoji.id.is_none());
        assert_eq!(reaction.emoji.name.as_deref(), Some("🔥"));
    }

    #[test]
    fn test_reaction_me_defaults_to_false() {
        let reaction = Reaction::decode(&json!({
            "count": 1,
            "emoji": {"name": "👀"}
        }))
        .unwrap();
        assert!(!reaction.me);
    }

    #[test]
    fn test_reaction_requires_emoji() {
        let err = Reaction::decode(&json!({"count": 1})).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::MissingField {
                entity: "Reaction",
                field: "emoji",
            }
        );
    }

    #[test]
    fn test_reaction_count_must_be_a_number() {
        let err = Reaction::decode(&json!({
            "count": "3",
            "emoji": {"name": "🔥"}
        }))
        .unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::TypeMismatch {
                entity: "Reaction",
                field: "count",
                expected: "number",
                found: "string",
            }
        );
    }

    #[test]
    fn test_reaction_round_trip_custom_emoji() {
        let reaction = Reaction {
            count: 12,
            me: false,
            emoji: Emoji {
                id: Some("41771983429993937".into()),
                name: Some("LUL".into()),
            },
        };
        assert_eq!(Reaction::decode(&reaction.encode()).unwrap(), reaction);
    }
}
