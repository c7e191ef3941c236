//! File attachments on messages.

use serde_json::Value;

use crate::error::SchemaViolation;
use crate::wire::{Field, Object, ObjectBuilder, Snowflake, Wire};

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub id: Snowflake,
    pub filename: String,
    /// Source URL of the file.
    pub url: String,
    /// File size in bytes.
    pub size: Option<u64>,
    pub proxy_url: Option<String>,
    /// Image height, when the file is an image.
    pub height: Option<u32>,
    pub width: Option<u32>,
}

impl Wire for Attachment {
    const ENTITY: &'static str = "Attachment";
    const FIELDS: &'static [Field] = &[
        Field::required("id", "id"),
        Field::required("filename", "filename"),
        Field::required("url", "url"),
        Field::optional("size", "size"),
        Field::optional("proxy_url", "proxy_url"),
        Field::optional("height", "height"),
        Field::optional("width", "width"),
    ];

    fn decode(value: &Value) -> Result<Self, SchemaViolation> {
        let obj = Object::of::<Self>(value)?;
        Ok(Self {
            id: obj.req_str("id")?,
            filename: obj.req_str("filename")?,
            url: obj.req_str("url")?,
            size: obj.opt_u64("size")?,
            proxy_url: obj.opt_str("proxy_url")?,
            height: obj.opt_u32("height")?,
            width: obj.opt_u32("width")?,
        })
    }

    fn encode(&self) -> Value {
        ObjectBuilder::new()
            .set("id", self.id.as_str())
            .set("filename", self.filename.as_str())
            .set("url", self.url.as_str())
            .set_opt("size", self.size)
            .set_opt("proxy_url", self.proxy_url.as_deref())
            .set_opt("height", self.height)
            .set_opt("width", self.width)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attachment_decodes_image_payload() {
        let attachment = Attachment::decode(&json!({
            "id": "730029344193249310",
            "filename": "cat.png",
            "size": 92116,
            "url": "https://cdn.example.com/attachments/cat.png",
            "proxy_url": "https://media.example.com/attachments/cat.png",
            "height": 600,
            "width": 800
        }))
        .unwrap();
        assert_eq!(attachment.filename, "cat.png");
        assert_eq!(attachment.size, Some(92116));
        assert_eq!(attachment.height, Some(600));
    }

    #[test]
    fn test_attachment_non_image_has_no_dimensions() {
        let attachment = Attachment::decode(&json!({
            "id": "1",
            "filename": "notes.txt",
            "url": "https://cdn.example.com/attachments/notes.txt",
            "height": null,
            "width": null
        }))
        .unwrap();
        assert!(attachment.height.is_none());
        assert!(attachment.width.is_none());
    }

    #[test]
    fn test_attachment_required_fields_enforced() {
        let full = json!({
            "id": "1",
            "filename": "cat.png",
            "url": "https://cdn.example.com/cat.png"
        });
        for field in Attachment::FIELDS.iter().filter(|f| f.required) {
            let mut payload = full.clone();
            payload.as_object_mut().unwrap().remove(field.key);
            let err = Attachment::decode(&payload).unwrap_err();
            assert_eq!(err.entity(), "Attachment");
            assert_eq!(err.field(), Some(field.key));
        }
    }

    #[test]
    fn test_attachment_round_trip_omits_absent_fields() {
        let attachment = Attachment {
            id: "1".into(),
            filename: "notes.txt".into(),
            url: "https://cdn.example.com/notes.txt".into(),
            size: None,
            proxy_url: None,
            height: None,
            width: None,
        };
        let encoded = attachment.encode();
        let keys: Vec<&str> = encoded.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["filename", "id", "url"]);
        assert_eq!(Attachment::decode(&encoded).unwrap(), attachment);
    }
}
