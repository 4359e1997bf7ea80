//! # Declaration Nodes
//!
//! Everything a component table can hold besides schemas: media content,
//! request bodies, responses, parameters, headers, links, security schemes
//! and callbacks.

use super::operations::PathItem;
use super::schema::{ReferenceNode, SchemaNode};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Either an inline declaration or a reference to a component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RefOr<T> {
    /// `$ref`
    Reference(ReferenceNode),
    /// Inline declaration.
    Item(T),
}

impl<T> RefOr<T> {
    /// The inline declaration, if this is not a reference.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            RefOr::Item(item) => Some(item),
            RefOr::Reference(_) => None,
        }
    }

    /// The reference, if this is one.
    pub fn as_reference(&self) -> Option<&ReferenceNode> {
        match self {
            RefOr::Reference(r) => Some(r),
            RefOr::Item(_) => None,
        }
    }
}

/// Which projection of a schema a media type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    /// No omission applied (parameters, headers, callbacks of unknown direction).
    Full,
    /// Request side: `readOnly` properties removed.
    Write,
    /// Response side: `writeOnly` properties removed.
    Read,
}

/// Per-property encoding of a multipart/form body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    /// `contentType`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// `headers`
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,
    /// `style`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    /// `explode`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// `allowReserved`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,
}

/// One entry of a `content` map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaType {
    /// The schema, after the read/write omission view was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<SchemaNode>,
    /// The projection applied to `definition`.
    pub visibility: Visibility,
    /// `encoding`
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub encodings: IndexMap<String, Encoding>,
}

/// `content`: media type name -> media type.
pub type Content = IndexMap<String, MediaType>;

/// A Request Body Object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `required`
    pub required: bool,
    /// `content`
    pub content: Content,
    /// Vendor extensions.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, Value>,
}

/// A Link Object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// `operationId`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// `operationRef`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_ref: Option<String>,
    /// `parameters` (values are runtime expressions or constants).
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Value>,
    /// `requestBody`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A Response Object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `headers`
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,
    /// `content`
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: Content,
    /// `links`
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, RefOr<Link>>,
    /// Vendor extensions.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, Value>,
}

/// Parameter location (`in`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// `path`
    Path,
    /// `query`
    Query,
    /// `header`
    Header,
    /// `cookie`
    Cookie,
}

impl ParameterLocation {
    /// All locations, in grouping order.
    pub const ALL: [ParameterLocation; 4] = [
        ParameterLocation::Path,
        ParameterLocation::Query,
        ParameterLocation::Header,
        ParameterLocation::Cookie,
    ];

    /// Parses the `in` keyword.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            _ => None,
        }
    }

    /// The keyword as written in documents and generated pointers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

/// Parameter serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    /// `matrix`
    Matrix,
    /// `label`
    Label,
    /// `form`
    Form,
    /// `simple`
    Simple,
    /// `spaceDelimited`
    SpaceDelimited,
    /// `pipeDelimited`
    PipeDelimited,
    /// `deepObject`
    DeepObject,
}

impl ParameterStyle {
    /// Parses the `style` keyword.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "matrix" => Some(ParameterStyle::Matrix),
            "label" => Some(ParameterStyle::Label),
            "form" => Some(ParameterStyle::Form),
            "simple" => Some(ParameterStyle::Simple),
            "spaceDelimited" => Some(ParameterStyle::SpaceDelimited),
            "pipeDelimited" => Some(ParameterStyle::PipeDelimited),
            "deepObject" => Some(ParameterStyle::DeepObject),
            _ => None,
        }
    }
}

/// A Parameter Object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// `name`
    pub name: String,
    /// `in`
    pub location: ParameterLocation,
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `required` (always true for path parameters).
    pub required: bool,
    /// `deprecated`
    pub deprecated: bool,
    /// `style`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    /// `explode`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// `allowReserved`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,
    /// `schema`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<SchemaNode>,
    /// `content` (mutually exclusive with `schema`).
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: Content,
}

impl Parameter {
    /// The schema describing the value: `schema`, else the first `content` schema.
    pub fn value_definition(&self) -> Option<&SchemaNode> {
        self.definition.as_ref().or_else(|| {
            self.content
                .values()
                .find_map(|media| media.definition.as_ref())
        })
    }
}

/// A Header Object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `required`
    pub required: bool,
    /// `deprecated`
    pub deprecated: bool,
    /// `style`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    /// `explode`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// `schema`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<SchemaNode>,
    /// `content`
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: Content,
}

/// One OAuth2 flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    /// `authorizationUrl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    /// `tokenUrl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// `refreshUrl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    /// `scopes`: scope -> description.
    pub scopes: IndexMap<String, String>,
}

/// The `flows` object of an OAuth2 scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    /// `implicit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,
    /// `password`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,
    /// `clientCredentials`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlow>,
    /// `authorizationCode`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlow>,
}

/// A Security Scheme Object, one variant per scheme `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecurityScheme {
    /// `http`
    Http {
        /// `scheme` (basic, bearer, ...).
        scheme: String,
        /// `bearerFormat`
        #[serde(skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
        /// `description`
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// `apiKey`
    ApiKey {
        /// Header/query/cookie name.
        name: String,
        /// Location.
        location: ParameterLocation,
        /// `description`
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// `openIdConnect`
    OpenIdConnect {
        /// `openIdConnectUrl`
        url: String,
        /// `description`
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// `oauth2`
    #[serde(rename = "oauth2")]
    OAuth2 {
        /// `flows`
        flows: OAuthFlows,
        /// `description`
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// `mutualTLS` (3.1)
    #[serde(rename = "mutualTLS")]
    MutualTls {
        /// `description`
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// A Callback Object: runtime expression -> path item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Callback {
    /// Expressions in declaration order.
    pub expressions: IndexMap<String, RefOr<PathItem>>,
}
