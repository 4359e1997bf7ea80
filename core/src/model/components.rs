//! # Component Table
//!
//! The arena of named definitions. Every cross-reference in the model is a
//! pointer string into one of these sections; nothing outside the table owns
//! a named definition.

use super::declarations::{
    Callback, Header, Link, Parameter, RefOr, RequestBody, Response, SecurityScheme,
};
use super::operations::PathItem;
use super::schema::SchemaNode;
use serde::Serialize;
use std::fmt;

/// A named, table-resident definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component<T> {
    /// Short name (the map key in the source document).
    pub name: String,
    /// Canonical pointer, unique within its section.
    pub reference_name: String,
    /// The definition.
    pub definition: T,
}

impl<T> Component<T> {
    /// Creates a component.
    pub fn new(name: impl Into<String>, reference_name: impl Into<String>, definition: T) -> Self {
        Self {
            name: name.into(),
            reference_name: reference_name.into(),
            definition,
        }
    }
}

/// The sections of a component table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    /// `schemas`
    Models,
    /// `requestBodies`
    RequestBodies,
    /// `responses`
    Responses,
    /// `parameters`
    Parameters,
    /// `headers`
    Headers,
    /// `securitySchemes`
    SecuritySchemes,
    /// `links`
    Links,
    /// `callbacks`
    Callbacks,
    /// `pathItems`
    PathItems,
}

impl Section {
    /// Every section, in table order.
    pub const ALL: [Section; 9] = [
        Section::Models,
        Section::RequestBodies,
        Section::Responses,
        Section::Parameters,
        Section::Headers,
        Section::SecuritySchemes,
        Section::Links,
        Section::Callbacks,
        Section::PathItems,
    ];

    /// The key under `components` in an OpenAPI document.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Models => "schemas",
            Section::RequestBodies => "requestBodies",
            Section::Responses => "responses",
            Section::Parameters => "parameters",
            Section::Headers => "headers",
            Section::SecuritySchemes => "securitySchemes",
            Section::Links => "links",
            Section::Callbacks => "callbacks",
            Section::PathItems => "pathItems",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A borrowed entry of any section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentRef<'a> {
    /// `schemas`
    Model(&'a Component<SchemaNode>),
    /// `requestBodies`
    RequestBody(&'a Component<RefOr<RequestBody>>),
    /// `responses`
    Response(&'a Component<RefOr<Response>>),
    /// `parameters`
    Parameter(&'a Component<RefOr<Parameter>>),
    /// `headers`
    Header(&'a Component<RefOr<Header>>),
    /// `securitySchemes`
    SecurityScheme(&'a Component<RefOr<SecurityScheme>>),
    /// `links`
    Link(&'a Component<RefOr<Link>>),
    /// `callbacks`
    Callback(&'a Component<RefOr<Callback>>),
    /// `pathItems`
    PathItem(&'a Component<RefOr<PathItem>>),
}

impl<'a> ComponentRef<'a> {
    /// Section the entry lives in.
    pub fn section(&self) -> Section {
        match self {
            ComponentRef::Model(_) => Section::Models,
            ComponentRef::RequestBody(_) => Section::RequestBodies,
            ComponentRef::Response(_) => Section::Responses,
            ComponentRef::Parameter(_) => Section::Parameters,
            ComponentRef::Header(_) => Section::Headers,
            ComponentRef::SecurityScheme(_) => Section::SecuritySchemes,
            ComponentRef::Link(_) => Section::Links,
            ComponentRef::Callback(_) => Section::Callbacks,
            ComponentRef::PathItem(_) => Section::PathItems,
        }
    }

    /// The entry's short name.
    pub fn name(&self) -> &'a str {
        match self {
            ComponentRef::Model(c) => &c.name,
            ComponentRef::RequestBody(c) => &c.name,
            ComponentRef::Response(c) => &c.name,
            ComponentRef::Parameter(c) => &c.name,
            ComponentRef::Header(c) => &c.name,
            ComponentRef::SecurityScheme(c) => &c.name,
            ComponentRef::Link(c) => &c.name,
            ComponentRef::Callback(c) => &c.name,
            ComponentRef::PathItem(c) => &c.name,
        }
    }

    /// The entry's canonical pointer.
    pub fn reference_name(&self) -> &'a str {
        match self {
            ComponentRef::Model(c) => &c.reference_name,
            ComponentRef::RequestBody(c) => &c.reference_name,
            ComponentRef::Response(c) => &c.reference_name,
            ComponentRef::Parameter(c) => &c.reference_name,
            ComponentRef::Header(c) => &c.reference_name,
            ComponentRef::SecurityScheme(c) => &c.reference_name,
            ComponentRef::Link(c) => &c.reference_name,
            ComponentRef::Callback(c) => &c.reference_name,
            ComponentRef::PathItem(c) => &c.reference_name,
        }
    }
}

/// The component table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// `schemas` plus hoisted schema fragments.
    pub models: Vec<Component<SchemaNode>>,
    /// `requestBodies`
    pub request_bodies: Vec<Component<RefOr<RequestBody>>>,
    /// `responses`
    pub responses: Vec<Component<RefOr<Response>>>,
    /// `parameters`
    pub parameters: Vec<Component<RefOr<Parameter>>>,
    /// `headers`
    pub headers: Vec<Component<RefOr<Header>>>,
    /// `securitySchemes`
    pub security_schemes: Vec<Component<RefOr<SecurityScheme>>>,
    /// `links`
    pub links: Vec<Component<RefOr<Link>>>,
    /// `callbacks`
    pub callbacks: Vec<Component<RefOr<Callback>>>,
    /// `pathItems` (3.1)
    pub path_items: Vec<Component<RefOr<PathItem>>>,
}

impl Components {
    /// Iterates every entry of `section`.
    pub fn section(&self, section: Section) -> Box<dyn Iterator<Item = ComponentRef<'_>> + '_> {
        match section {
            Section::Models => Box::new(self.models.iter().map(ComponentRef::Model)),
            Section::RequestBodies => {
                Box::new(self.request_bodies.iter().map(ComponentRef::RequestBody))
            }
            Section::Responses => Box::new(self.responses.iter().map(ComponentRef::Response)),
            Section::Parameters => Box::new(self.parameters.iter().map(ComponentRef::Parameter)),
            Section::Headers => Box::new(self.headers.iter().map(ComponentRef::Header)),
            Section::SecuritySchemes => Box::new(
                self.security_schemes
                    .iter()
                    .map(ComponentRef::SecurityScheme),
            ),
            Section::Links => Box::new(self.links.iter().map(ComponentRef::Link)),
            Section::Callbacks => Box::new(self.callbacks.iter().map(ComponentRef::Callback)),
            Section::PathItems => Box::new(self.path_items.iter().map(ComponentRef::PathItem)),
        }
    }

    /// Iterates every entry of every section, in table order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentRef<'_>> + '_ {
        Section::ALL.into_iter().flat_map(move |s| self.section(s))
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when every section is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when an entry with `reference_name` exists in any section.
    pub fn contains(&self, reference_name: &str) -> bool {
        self.iter().any(|c| c.reference_name() == reference_name)
    }

    /// Appends a clone of `entry` to its section.
    pub fn push(&mut self, entry: ComponentRef<'_>) {
        match entry {
            ComponentRef::Model(c) => self.models.push(c.clone()),
            ComponentRef::RequestBody(c) => self.request_bodies.push(c.clone()),
            ComponentRef::Response(c) => self.responses.push(c.clone()),
            ComponentRef::Parameter(c) => self.parameters.push(c.clone()),
            ComponentRef::Header(c) => self.headers.push(c.clone()),
            ComponentRef::SecurityScheme(c) => self.security_schemes.push(c.clone()),
            ComponentRef::Link(c) => self.links.push(c.clone()),
            ComponentRef::Callback(c) => self.callbacks.push(c.clone()),
            ComponentRef::PathItem(c) => self.path_items.push(c.clone()),
        }
    }

    /// Sorts every section lexicographically by name.
    pub fn sort_by_name(&mut self) {
        fn sort<T>(entries: &mut [Component<T>]) {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }
        sort(&mut self.models);
        sort(&mut self.request_bodies);
        sort(&mut self.responses);
        sort(&mut self.parameters);
        sort(&mut self.headers);
        sort(&mut self.security_schemes);
        sort(&mut self.links);
        sort(&mut self.callbacks);
        sort(&mut self.path_items);
    }
}
