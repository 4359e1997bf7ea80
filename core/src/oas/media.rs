//! # Media Content
//!
//! `content` maps of request bodies, responses, parameters and headers. The
//! schema of each media type is stored as the omitted view for its side of
//! the wire when read/write omission is enabled.

use super::fields::{self, child};
use super::Parser;
use crate::error::AppResult;
use crate::model::{Content, Encoding, MediaType, ParameterStyle, Visibility};
use crate::omission::omit;
use serde_json::Value;

impl Parser<'_> {
    pub(crate) fn parse_content(
        &self,
        value: Option<&Value>,
        visibility: Visibility,
        at: &str,
    ) -> AppResult<Content> {
        let mut content = Content::new();
        let Some(entries) = value.and_then(Value::as_object) else {
            return Ok(content);
        };
        let base = child(at, "content");
        for (media_type, raw) in entries {
            let pointer = child(&base, media_type);
            content.insert(
                media_type.clone(),
                self.parse_media_type(raw, visibility, &pointer)?,
            );
        }
        Ok(content)
    }

    fn parse_media_type(&self, value: &Value, visibility: Visibility, at: &str) -> AppResult<MediaType> {
        let visibility = if self.options.omit_read_write {
            visibility
        } else {
            Visibility::Full
        };
        let Some(map) = value.as_object() else {
            self.warn(at, "Media type is not a mapping, ignoring it");
            return Ok(MediaType {
                definition: None,
                visibility,
                encodings: Default::default(),
            });
        };

        let definition = match map.get("schema") {
            Some(schema) => {
                let parsed = self.parse_schema(schema, &child(at, "schema"))?;
                Some(omit(&parsed, visibility, &self.models, self.sink).unwrap_or(parsed))
            }
            None => None,
        };

        let mut encodings = indexmap::IndexMap::new();
        if let Some(raw) = fields::object(map, "encoding") {
            let base = child(at, "encoding");
            for (property, encoding) in raw {
                let Some(encoding) = encoding.as_object() else {
                    continue;
                };
                let pointer = child(&base, property);
                encodings.insert(
                    property.clone(),
                    Encoding {
                        content_type: fields::string(encoding, "contentType"),
                        headers: self.parse_headers(encoding.get("headers"), &pointer)?,
                        style: fields::string(encoding, "style")
                            .as_deref()
                            .and_then(ParameterStyle::parse),
                        explode: fields::boolean(encoding, "explode"),
                        allow_reserved: fields::boolean(encoding, "allowReserved"),
                    },
                );
            }
        }

        Ok(MediaType {
            definition,
            visibility,
            encodings,
        })
    }
}
