//! Embedded rich content on messages.
//!
//! Every embed field is individually optional; a bare `{}` is a valid
//! embed. The `with_*` constructors cover the send direction, where callers
//! assemble an embed and rely on encode to keep the payload sparse.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::SchemaViolation;
use crate::wire::{Field, Object, ObjectBuilder, Wire};

/// Embedded content in a message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embed {
    pub title: Option<String>,
    /// Embed kind tag, "rich" for webhook-supplied embeds.
    pub embed_type: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    /// Accent color as an RGB integer.
    pub color: Option<u32>,
    pub footer: Option<EmbedFooter>,
    pub thumbnail: Option<Image>,
    pub video: Option<Image>,
    pub provider: Option<EmbedProvider>,
    pub author: Option<EmbedAuthor>,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_footer(mut self, footer: EmbedFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn with_author(mut self, author: EmbedAuthor) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }
}

impl Wire for Embed {
    const ENTITY: &'static str = "Embed";
    const FIELDS: &'static [Field] = &[
        Field::optional("title", "title"),
        Field::optional("embed_type", "type"),
        Field::optional("description", "description"),
        Field::optional("url", "url"),
        Field::optional("timestamp", "timestamp"),
        Field::optional("color", "color"),
        Field::optional("footer", "footer"),
        Field::optional("thumbnail", "thumbnail"),
        Field::optional("video", "video"),
        Field::optional("provider", "provider"),
        Field::optional("author", "author"),
        Field::optional("fields", "fields"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            title: obj.opt_str("title")?,
            embed_type: obj.opt_str("type")?,
            description: obj.opt_str("description")?,
            url: obj.opt_str("url")?,
            timestamp: obj.opt_timestamp("timestamp")?,
            color: obj.opt_u32("color")?,
            footer: obj.opt_entity("footer")?,
            thumbnail: obj.opt_entity("thumbnail")?,
            video: obj.opt_entity("video")?,
            provider: obj.opt_entity("provider")?,
            author: obj.opt_entity("author")?,
            fields: obj.list("fields")?,
        })
    }

    fn encode(&self) -> Value {
        let mut builder = ObjectBuilder::new()
            .set_opt("title", self.title.as_deref())
            .set_opt("type", self.embed_type.as_deref())
            .set_opt("description", self.description.as_deref())
            .set_opt("url", self.url.as_deref())
            .set_timestamp("timestamp", self.timestamp)
            .set_opt("color", self.color)
            .set_entity("footer", self.footer.as_ref())
            .set_entity("thumbnail", self.thumbnail.as_ref())
            .set_entity("video", self.video.as_ref())
            .set_entity("provider", self.provider.as_ref())
            .set_entity("author", self.author.as_ref());
        if !self.fields.is_empty() {
            builder = builder.set_list("fields", &self.fields);
        }
        builder.build()
    }
}

/// Image-shaped media slot, shared by thumbnails and videos.
///
/// Dimensions are absent when the platform has not probed the media yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub url: Option<String>,
    /// CDN-proxied copy of `url`.
    pub proxy_url: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

impl Wire for Image {
    const ENTITY: &'static str = "Image";
    const FIELDS: &'static [Field] = &[
        Field::optional("url", "url"),
        Field::optional("proxy_url", "proxy_url"),
        Field::optional("height", "height"),
        Field::optional("width", "width"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            url: obj.opt_str("url")?,
            proxy_url: obj.opt_str("proxy_url")?,
            height: obj.opt_u32("height")?,
            width: obj.opt_u32("width")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set_opt("url", self.url.as_deref())
            .set_opt("proxy_url", self.proxy_url.as_deref())
            .set_opt("height", self.height)
            .set_opt("width", self.width)
            .build()
    }
}

/// Site the embedded content came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedProvider {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl Wire for EmbedProvider {
    const ENTITY: &'static str = "EmbedProvider";
    const FIELDS: &'static [Field] = &[
        Field::optional("name", "name"),
        Field::optional("url", "url"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            name: obj.opt_str("name")?,
            url: obj.opt_str("url")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set_opt("name", self.name.as_deref())
            .set_opt("url", self.url.as_deref())
            .build()
    }
}

/// Footer line under an embed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
    /// Icon URL; http(s) and attachment schemes only.
    pub icon_url: Option<String>,
    pub proxy_icon_url: Option<String>,
}

impl EmbedFooter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon_url: None,
            proxy_icon_url: None,
        }
    }
}

impl Wire for EmbedFooter {
    const ENTITY: &'static str = "EmbedFooter";
    const FIELDS: &'static [Field] = &[
        Field::required("text", "text"),
        Field::optional("icon_url", "icon_url"),
        Field::optional("proxy_icon_url", "proxy_icon_url"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            text: obj.req_str("text")?,
            icon_url: obj.opt_str("icon_url")?,
            proxy_icon_url: obj.opt_str("proxy_icon_url")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set("text", self.text.as_str())
            .set_opt("icon_url", self.icon_url.as_deref())
            .set_opt("proxy_icon_url", self.proxy_icon_url.as_deref())
            .build()
    }
}

/// Byline above an embed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: Option<String>,
    pub icon_url: Option<String>,
    pub proxy_icon_url: Option<String>,
}

impl EmbedAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            icon_url: None,
            proxy_icon_url: None,
        }
    }
}

impl Wire for EmbedAuthor {
    const ENTITY: &'static str = "EmbedAuthor";
    const FIELDS: &'static [Field] = &[
        Field::required("name", "name"),
        Field::optional("url", "url"),
        Field::optional("icon_url", "icon_url"),
        Field::optional("proxy_icon_url", "proxy_icon_url"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            name: obj.req_str("name")?,
            url: obj.opt_str("url")?,
            icon_url: obj.opt_str("icon_url")?,
            proxy_icon_url: obj.opt_str("proxy_icon_url")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set("name", self.name.as_str())
            .set_opt("url", self.url.as_deref())
            .set_opt("icon_url", self.icon_url.as_deref())
            .set_opt("proxy_icon_url", self.proxy_icon_url.as_deref())
            .build()
    }
}

/// One name/value pair in an embed body.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    /// Whether the field may share a row with its neighbors.
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

impl Wire for EmbedField {
    const ENTITY: &'static str = "EmbedField";
    const FIELDS: &'static [Field] = &[
        Field::required("name", "name"),
        Field::required("value", "value"),
        Field::optional("inline", "inline"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            name: obj.req_str("name")?,
            value: obj.req_str("value")?,
            inline: obj.flag("inline")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set("name", self.name.as_str())
            .set("value", self.value.as_str())
            .set("inline", self.inline)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn full_embed() -> Embed {
        Embed {
            title: Some("Release notes".into()),
            embed_type: Some("rich".into()),
            description: Some("What changed this week".into()),
            url: Some("https://example.com/releases/42".into()),
            timestamp: Some(Utc.with_ymd_and_hms(2017, 7, 11, 17, 27, 7).unwrap()),
            color: Some(0x3498db),
            footer: Some(EmbedFooter {
                text: "build 42".into(),
                icon_url: Some("https://example.com/icon.png".into()),
                proxy_icon_url: Some("https://proxy.example.com/icon.png".into()),
            }),
            thumbnail: Some(Image {
                url: Some("https://example.com/thumb.png".into()),
                proxy_url: Some("https://proxy.example.com/thumb.png".into()),
                height: Some(80),
                width: Some(80),
            }),
            video: Some(Image {
                url: Some("https://example.com/clip.mp4".into()),
                proxy_url: None,
                height: Some(720),
                width: Some(1280),
            }),
            provider: Some(EmbedProvider {
                name: Some("example".into()),
                url: Some("https://example.com".into()),
            }),
            author: Some(EmbedAuthor {
                name: "release-bot".into(),
                url: Some("https://example.com/bot".into()),
                icon_url: None,
                proxy_icon_url: None,
            }),
            fields: vec![
                EmbedField::new("commits", "37").inline(),
                EmbedField::new("rollbacks", "0").inline(),
            ],
        }
    }

    #[test]
    fn test_empty_object_is_a_valid_embed() {
        let embed = Embed::decode(&json!({})).unwrap();
        assert_eq!(embed, Embed::default());
        assert!(embed.fields.is_empty());
    }

    #[test]
    fn test_full_round_trip() {
        let embed = full_embed();
        assert_eq!(Embed::decode(&embed.encode()).unwrap(), embed);
    }

    #[test]
    fn test_encode_covers_exactly_the_wire_table() {
        let encoded = full_embed().encode();
        let emitted: BTreeSet<&str> = encoded
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let declared: BTreeSet<&str> = Embed::FIELDS.iter().map(|f| f.key).collect();
        assert_eq!(emitted, declared);
    }

    #[test]
    fn test_sparse_embed_omits_absent_keys() {
        let encoded = Embed::new().with_title("hi").encode();
        let keys: Vec<&str> = encoded
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["title"]);
    }

    #[test]
    fn test_footer_wire_key_is_footer() {
        let embed = Embed::decode(&json!({
            "footer": {"text": "sourced from example.com"}
        }))
        .unwrap();
        assert_eq!(embed.footer.unwrap().text, "sourced from example.com");
    }

    #[test]
    fn test_footer_requires_text() {
        let err = Embed::decode(&json!({"footer": {"icon_url": "https://x/i.png"}})).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::MissingField {
                entity: "EmbedFooter",
                field: "text",
            }
        );
    }

    #[test]
    fn test_bad_nested_timestamp_names_the_embed() {
        let err = Embed::decode(&json!({"timestamp": "eleven o'clock"})).unwrap_err();
        assert_eq!(err.entity(), "Embed");
        assert_eq!(err.field(), Some("timestamp"));
        assert!(matches!(err, SchemaViolation::Malformed { .. }));
    }

    #[test]
    fn test_color_must_not_coerce_from_string() {
        let err = Embed::decode(&json!({"color": "#3498db"})).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::TypeMismatch {
                entity: "Embed",
                field: "color",
                expected: "number",
                found: "string",
            }
        );
    }

    #[test]
    fn test_image_dimensions_may_be_zero() {
        let image = Image::decode(&json!({"url": "https://x/i.png", "height": 0, "width": 0})).unwrap();
        assert_eq!(image.height, Some(0));
        assert_eq!(image.width, Some(0));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let embed = Embed::decode(&json!({
            "title": "hi",
            "flags": 32,
            "reference_id": "998"
        }))
        .unwrap();
        assert_eq!(embed.title.as_deref(), Some("hi"));
    }

    #[test]
    fn test_builder_matches_literal_construction() {
        let built = Embed::new()
            .with_title("Release notes")
            .with_color(0x3498db)
            .with_footer(EmbedFooter::new("build 42"))
            .with_field(EmbedField::new("commits", "37").inline());
        assert_eq!(built.title.as_deref(), Some("Release notes"));
        assert_eq!(built.color, Some(0x3498db));
        assert_eq!(built.footer.as_ref().unwrap().text, "build 42");
        assert!(built.fields[0].inline);
    }
}
