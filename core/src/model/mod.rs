#![deny(missing_docs)]

//! # Node Model
//!
//! The tagged-variant type system shared by every stage.
//!
//! - **schema**: type-level nodes (primitive, object, array, composite, union, exclusion, reference).
//! - **declarations**: media content, request bodies, responses, parameters, headers,
//!   links, security schemes, callbacks.
//! - **operations**: paths, path items, operations, tags.
//! - **components**: the named-definition arena.
//! - **document**: parsed and optimized documents.
//! - **visit**: reference collection and in-place schema rewriting.

pub mod components;
pub mod declarations;
pub mod document;
pub mod modifiers;
pub mod operations;
pub mod schema;
pub mod visit;

pub use components::{Component, ComponentRef, Components, Section};
pub use declarations::{
    Callback, Content, Encoding, Header, Link, MediaType, OAuthFlow, OAuthFlows, Parameter,
    ParameterLocation, ParameterStyle, RefOr, RequestBody, Response, SecurityScheme, Visibility,
};
pub use document::{
    Document, OptimizedDocument, OptimizedOperation, OptimizedPath, OptimizedPathItem,
    ParameterGroups,
};
pub use modifiers::{Discriminator, ExclusiveBound, Modifiers};
pub use operations::{HttpMethod, Operation, Path, PathItem, SecurityRequirement, Tag};
pub use schema::{
    AdditionalProperties, ArrayNode, CompositeNode, ExclusionNode, ObjectNode, PrimitiveNode,
    PrimitiveType, Property, ReferenceNode, SchemaNode, UnionDiscriminator, UnionKind, UnionNode,
};
pub use visit::{CollectReferences, VisitSchemasMut};
