//! Module that defines what a site (API endpoint) is.
//!
//! This is used to configure the list of possible services through
//! `sources.hcl`.  Sites can have different ways to authenticate (or not) the
//! request; the NASA endpoints want an API key, the others are anonymous.
//!
//! You can define a set of possible routes for a site depending on how the
//! API is designed.
//!

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

use crate::SourceError;

/// Which client knows how to talk to a given site.
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    #[default]
    OpenNotify,
    Nominatim,
    SpaceX,
    #[strum(serialize = "spaceflight-news")]
    SpaceflightNews,
    Nasa,
}

/// Describe what a site is and associated credentials.
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Site {
    /// Name of the site, filled in from the config key
    pub name: Option<String>,
    /// Which access module handles it
    pub kind: String,
    /// Base URL (to avoid repeating)
    pub base_url: String,
    /// Credentials
    pub auth: Option<Auth>,
    /// Different URLs available
    pub routes: Option<BTreeMap<String, String>>,
}

/// Describe the possible ways to authenticate oneself
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Auth {
    /// Nothing special, no auth
    #[default]
    Anon,
    /// Using an API key supplied through the URL
    Key { api_key: String },
}

impl Display for Auth {
    /// Obfuscate the key
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let auth = match self.clone() {
            Auth::Key { .. } => Auth::Key {
                api_key: "HIDDEN".to_string(),
            },
            _ => Auth::Anon,
        };
        write!(f, "{:?}", auth)
    }
}

impl Site {
    /// Basic `new()`
    ///
    pub fn new() -> Self {
        Site::default()
    }

    /// Return the site kind
    ///
    pub fn kind(&self) -> Result<Kind, SourceError> {
        Kind::from_str(&self.kind)
            .map_err(|_| SourceError::BadParam(format!("unknown kind {}", self.kind)))
    }

    /// Return the list of routes
    ///
    pub fn list(&self) -> Vec<&String> {
        match &self.routes {
            Some(routes) => routes.keys().collect::<Vec<_>>(),
            _ => vec![],
        }
    }

    /// Check whether site has the mentioned route
    ///
    pub fn has(&self, meth: &str) -> bool {
        match &self.routes {
            Some(routes) => routes.contains_key(meth),
            _ => false,
        }
    }

    /// Retrieve a route
    ///
    pub fn route(&self, key: &str) -> Option<&String> {
        match &self.routes {
            Some(routes) => routes.get(key),
            _ => None,
        }
    }

    /// Full URL for a given route
    ///
    pub fn url(&self, key: &str) -> Result<String, SourceError> {
        match self.route(key) {
            Some(r) => Ok(format!("{}{}", self.base_url, r)),
            None => Err(SourceError::UnknownRoute(
                self.name.clone().unwrap_or_default(),
                key.to_string(),
            )),
        }
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let auth = match self.auth.clone() {
            Some(auth) => auth,
            _ => Auth::Anon,
        };
        write!(
            f,
            "{{ kind={} url={} auth={} routes={:?} }}",
            self.kind, self.base_url, auth, self.routes
        )
    }
}
