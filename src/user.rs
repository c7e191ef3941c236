//! User and role objects referenced by messages.

use serde_json::Value;

use crate::error::SchemaViolation;
use crate::wire::{Field, Object, ObjectBuilder, Snowflake, Wire};

/// A platform account.
///
/// On webhook messages this is the webhook's pseudo-user and does not
/// correspond to a real account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Snowflake,
    /// Username, not unique across the platform.
    pub username: String,
    /// Legacy 4-digit tag; the platform is phasing it out, so it may be gone.
    pub discriminator: Option<String>,
    /// Avatar image hash.
    pub avatar: Option<String>,
    /// Whether the account belongs to a bot application.
    pub bot: bool,
}

impl Wire for User {
    const ENTITY: &'static str = "User";
    const FIELDS: &'static [Field] = &[
        Field::required("id", "id"),
        Field::required("username", "username"),
        Field::optional("discriminator", "discriminator"),
        Field::optional("avatar", "avatar"),
        Field::optional("bot", "bot"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            id: obj.req_str("id")?,
            username: obj.req_str("username")?,
            discriminator: obj.opt_str("discriminator")?,
            avatar: obj.opt_str("avatar")?,
            bot: obj.flag("bot")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set("id", self.id.as_str())
            .set("username", self.username.as_str())
            .set_opt("discriminator", self.discriminator.as_deref())
            .set_opt("avatar", self.avatar.as_deref())
            .set("bot", self.bot)
            .build()
    }
}

/// A guild role.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    /// Display color as an RGB integer.
    pub color: Option<u32>,
    /// Whether the role is pinned in the member list.
    pub hoist: bool,
    pub position: Option<i64>,
    /// Permission bit set, serialized as a string because it exceeds 53 bits.
    pub permissions: Option<String>,
    /// Whether an integration manages this role.
    pub managed: bool,
    pub mentionable: bool,
}

impl Wire for Role {
    const ENTITY: &'static str = "Role";
    const FIELDS: &'static [Field] = &[
        Field::required("id", "id"),
        Field::required("name", "name"),
        Field::optional("color", "color"),
        Field::optional("hoist", "hoist"),
        Field::optional("position", "position"),
        Field::optional("permissions", "permissions"),
        Field::optional("managed", "managed"),
        Field::optional("mentionable", "mentionable"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            id: obj.req_str("id")?,
            name: obj.req_str("name")?,
            color: obj.opt_u32("color")?,
            hoist: obj.flag("hoist")?,
            position: obj.opt_i64("position")?,
            permissions: obj.opt_str("permissions")?,
            managed: obj.flag("managed")?,
            mentionable: obj.flag("mentionable")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set("id", self.id.as_str())
            .set("name", self.name.as_str())
            .set_opt("color", self.color)
            .set("hoist", self.hoist)
            .set_opt("position", self.position)
            .set_opt("permissions", self.permissions.as_deref())
            .set("managed", self.managed)
            .set("mentionable", self.mentionable)
            .build()
    }
}
