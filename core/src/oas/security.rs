//! # Security
//!
//! Security Scheme Objects and Security Requirement lists.

use super::fields;
use super::Parser;
use crate::model::{
    OAuthFlow, OAuthFlows, ParameterLocation, RefOr, SecurityRequirement, SecurityScheme,
};
use serde_json::{Map, Value};

impl Parser<'_> {
    /// Parses one Security Scheme Object; unknown scheme types are skipped with a warning.
    pub(crate) fn parse_security_scheme(&self, value: &Value, at: &str) -> Option<RefOr<SecurityScheme>> {
        let Some(map) = value.as_object() else {
            self.warn(at, "Security scheme is not a mapping, skipping it");
            return None;
        };
        if let Some(reference) = fields::reference(map) {
            return Some(RefOr::Reference(reference));
        }

        let description = fields::string(map, "description");
        let scheme = match fields::string(map, "type").as_deref() {
            Some("http") => SecurityScheme::Http {
                scheme: fields::string(map, "scheme").unwrap_or_else(|| {
                    self.warn(at, "HTTP security scheme has no 'scheme', assuming bearer");
                    "bearer".to_string()
                }),
                bearer_format: fields::string(map, "bearerFormat"),
                description,
            },
            Some("apiKey") => SecurityScheme::ApiKey {
                name: fields::string(map, "name").unwrap_or_else(|| {
                    self.warn(at, "API key security scheme has no name");
                    String::new()
                }),
                location: fields::string(map, "in")
                    .as_deref()
                    .and_then(ParameterLocation::parse)
                    .unwrap_or_else(|| {
                        self.warn(at, "API key security scheme has no valid 'in', assuming header");
                        ParameterLocation::Header
                    }),
                description,
            },
            Some("openIdConnect") => SecurityScheme::OpenIdConnect {
                url: fields::string(map, "openIdConnectUrl").unwrap_or_else(|| {
                    self.warn(at, "OpenID Connect security scheme has no URL");
                    String::new()
                }),
                description,
            },
            Some("oauth2") => SecurityScheme::OAuth2 {
                flows: fields::object(map, "flows")
                    .map(parse_flows)
                    .unwrap_or_default(),
                description,
            },
            Some("mutualTLS") => {
                self.dialect_feature(self.dialect.mutual_tls(), at, "mutualTLS");
                SecurityScheme::MutualTls { description }
            }
            other => {
                self.warn(
                    at,
                    format!(
                        "Unknown security scheme type '{}', skipping it",
                        other.unwrap_or_default()
                    ),
                );
                return None;
            }
        };
        Some(RefOr::Item(scheme))
    }
}

fn parse_flows(map: &Map<String, Value>) -> OAuthFlows {
    let flow = |key: &str| fields::object(map, key).map(parse_flow);
    OAuthFlows {
        implicit: flow("implicit"),
        password: flow("password"),
        client_credentials: flow("clientCredentials"),
        authorization_code: flow("authorizationCode"),
    }
}

fn parse_flow(map: &Map<String, Value>) -> OAuthFlow {
    OAuthFlow {
        authorization_url: fields::string(map, "authorizationUrl"),
        token_url: fields::string(map, "tokenUrl"),
        refresh_url: fields::string(map, "refreshUrl"),
        scopes: fields::object(map, "scopes")
            .map(|scopes| {
                scopes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_string()))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Parses a Security Requirement list. `None` when the field is absent, so an
/// operation can tell "inherit" apart from an explicit empty list.
pub(crate) fn parse_security_requirements(
    value: Option<&Value>,
) -> Option<Vec<SecurityRequirement>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_object)
            .map(|requirement| SecurityRequirement {
                schemes: requirement
                    .iter()
                    .map(|(name, scopes)| {
                        let scopes = scopes
                            .as_array()
                            .map(|s| s.iter().filter_map(Value::as_str).map(str::to_string).collect())
                            .unwrap_or_default();
                        (name.clone(), scopes)
                    })
                    .collect(),
            })
            .collect(),
    )
}
