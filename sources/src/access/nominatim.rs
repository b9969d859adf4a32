//! Nominatim (openstreetmap.org) reverse geocoding.
//!
//! One route, `reverse`, taking the coordinate as query parameters.  Any kind
//! of failure is treated uniformly by the caller so we only return a plain
//! `Result` here, no fallback logic.
//!

use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, trace};

use cosmicview_common::Coord;

use crate::{agent, Site, SourceError};

/// This is the Nominatim client/source struct.
///
#[derive(Clone, Debug)]
pub struct Nominatim {
    /// Base site url taken from config
    pub base_url: String,
    /// Add this to `base_url` for reverse lookups
    pub reverse: String,
    /// reqwest async client
    pub client: Client,
}

/// Only field we care about in the reply.
///
#[derive(Debug, Deserialize)]
struct ReverseReply {
    display_name: Option<String>,
}

impl Nominatim {
    #[tracing::instrument]
    pub fn new() -> Self {
        trace!("nominatim::new");

        Nominatim {
            base_url: "".to_owned(),
            reverse: "".to_owned(),
            client: Client::new(),
        }
    }

    /// Load some data from in-memory loaded config
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, site: &Site) -> &mut Self {
        trace!("nominatim::load");

        self.base_url = site.base_url.to_owned();
        self.reverse = site.route("reverse").unwrap().to_owned();
        self
    }

    /// Resolve a coordinate into a human-readable place name.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn reverse(&self, pos: Coord) -> Result<String, SourceError> {
        let url = format!("{}{}", self.base_url, self.reverse);
        trace!("Reverse geocoding {} at {}…", pos, url);

        let resp = self
            .client
            .get(&url)
            .header(USER_AGENT, agent())
            .query(&[
                ("format", "json".to_string()),
                ("lat", pos.lat.to_string()),
                ("lon", pos.lon.to_string()),
            ])
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => (),
            code => {
                let h = resp.headers().clone();
                return Err(SourceError::Status(code.as_u16(), format!("{:?}", h)));
            }
        }

        let reply: ReverseReply = resp.json().await?;
        debug!("{:?}", &reply);

        reply
            .display_name
            .ok_or(SourceError::MissingField("display_name"))
    }
}

impl Default for Nominatim {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> Nominatim {
        let mut c = Nominatim::new();
        c.base_url = server.base_url();
        c.reverse = "/reverse".to_string();
        c
    }

    #[tokio::test]
    async fn test_reverse_ok() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/reverse")
                    .query_param("format", "json")
                    .query_param("lat", "51.4769")
                    .query_param("lon", "0");
                then.status(200)
                    .json_body(json!({"display_name": "Royal Observatory, Greenwich"}));
            })
            .await;

        let c = client_for(&server);
        let name = c.reverse(Coord::new(51.4769, 0.0).unwrap()).await.unwrap();
        m.assert_async().await;
        assert_eq!("Royal Observatory, Greenwich", name);
    }

    #[tokio::test]
    async fn test_reverse_missing_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/reverse");
                then.status(200).json_body(json!({"error": "Unable to geocode"}));
            })
            .await;

        let c = client_for(&server);
        assert!(c.reverse(Coord::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_reverse_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/reverse");
                then.status(500);
            })
            .await;

        let c = client_for(&server);
        assert!(c.reverse(Coord::default()).await.is_err());
    }
}
