//! The message resource itself.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::attachment::Attachment;
use crate::embed::Embed;
use crate::error::SchemaViolation;
use crate::reaction::Reaction;
use crate::user::{Role, User};
use crate::wire::{Field, Object, ObjectBuilder, Snowflake, Wire};

/// A message sent in a channel.
///
/// When `webhook_id` is set the message came from a webhook and `author`
/// holds the webhook's pseudo-user, not a verifiable account.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author: Option<User>,
    /// Markdown body; empty when the message carries only attachments or
    /// embeds.
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
    /// When the message was last edited; absent if never.
    pub edited_timestamp: Option<DateTime<Utc>>,
    /// Whether this was a text-to-speech message.
    pub tts: bool,
    pub mention_everyone: bool,
    /// Users specifically mentioned in the message.
    pub mentions: Vec<User>,
    /// Roles specifically mentioned in the message.
    pub mention_roles: Vec<Role>,
    pub attachments: Vec<Attachment>,
    pub embeds: Vec<Embed>,
    pub reactions: Vec<Reaction>,
    /// Client-chosen token used to validate that a send went through.
    pub nonce: Option<String>,
    pub pinned: bool,
    pub webhook_id: Option<Snowflake>,
}

impl Message {
    /// Whether the author is a webhook pseudo-user rather than an account.
    pub fn is_webhook(&self) -> bool {
        self.webhook_id.is_some()
    }
}

impl Wire for Message {
    const ENTITY: &'static str = "Message";
    const FIELDS: &'static [Field] = &[
        Field::required("id", "id"),
        Field::required("channel_id", "channel_id"),
        Field::optional("author", "author"),
        Field::optional("content", "content"),
        Field::optional("timestamp", "timestamp"),
        Field::optional("edited_timestamp", "edited_timestamp"),
        Field::optional("tts", "tts"),
        Field::optional("mention_everyone", "mention_everyone"),
        Field::optional("mentions", "mentions"),
        Field::optional("mention_roles", "mention_roles"),
        Field::optional("attachments", "attachments"),
        Field::optional("embeds", "embeds"),
        Field::optional("reactions", "reactions"),
        Field::optional("nonce", "nonce"),
        Field::optional("pinned", "pinned"),
        Field::optional("webhook_id", "webhook_id"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            id: obj.req_str("id")?,
            channel_id: obj.req_str("channel_id")?,
            author: obj.opt_entity("author")?,
            content: obj.str_or_empty("content")?,
            timestamp: obj.opt_timestamp("timestamp")?,
            edited_timestamp: obj.opt_timestamp("edited_timestamp")?,
            tts: obj.flag("tts")?,
            mention_everyone: obj.flag("mention_everyone")?,
            mentions: obj.list("mentions")?,
            mention_roles: obj.list("mention_roles")?,
            attachments: obj.list("attachments")?,
            embeds: obj.list("embeds")?,
            reactions: obj.list("reactions")?,
            nonce: obj.opt_str("nonce")?,
            pinned: obj.flag("pinned")?,
            webhook_id: obj.opt_str("webhook_id")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set("id", self.id.as_str())
            .set("channel_id", self.channel_id.as_str())
            .set_entity("author", self.author.as_ref())
            .set("content", self.content.as_str())
            .set_timestamp("timestamp", self.timestamp)
            .set_timestamp("edited_timestamp", self.edited_timestamp)
            .set("tts", self.tts)
            .set("mention_everyone", self.mention_everyone)
            .set_list("mentions", &self.mentions)
            .set_list("mention_roles", &self.mention_roles)
            .set_list("attachments", &self.attachments)
            .set_list("embeds", &self.embeds)
            .set_list("reactions", &self.reactions)
            .set_opt("nonce", self.nonce.as_deref())
            .set("pinned", self.pinned)
            .set_opt("webhook_id", self.webhook_id.as_deref())
            .build()
    }
}
