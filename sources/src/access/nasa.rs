//! NASA open APIs (api.nasa.gov).
//!
//! Three routes behind the same API key:
//! - `apod`: Astronomy Picture of the Day, either N random entries or one
//!   specific date.  The service answers with an object for a single date
//!   and an array otherwise, both are accepted.
//! - `neo`: NeoWs close-approach feed for one day.
//! - `mars`: Curiosity rover photos for a given sol.
//!

use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use tracing::{debug, error, trace};

use crate::{agent, Auth, Site, SourceError};

/// This is the NASA client/source struct.
///
#[derive(Clone, Debug)]
pub struct Nasa {
    /// Base site url taken from config
    pub base_url: String,
    /// APOD route
    pub apod: String,
    /// NeoWs feed route
    pub neo: String,
    /// Mars rover photos route
    pub mars: String,
    /// API key, every route wants it
    pub api_key: String,
    /// reqwest async client
    pub client: Client,
}

/// What to ask the APOD route for.
///
#[derive(Clone, Copy, Debug)]
pub enum ApodQuery {
    /// N random pictures
    Count(u32),
    /// The picture for one specific day
    Date(NaiveDate),
}

/// One APOD entry.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApodEntry {
    /// Title of the picture
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Picture URL
    pub url: Option<String>,
    /// High resolution variant
    pub hdurl: Option<String>,
    /// Long form description
    pub explanation: String,
}

/// Single date queries get an object, `count` queries an array.
///
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApodReply {
    Many(Vec<ApodEntry>),
    One(Box<ApodEntry>),
}

/// One near-Earth object out of the daily feed.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Neo {
    /// API identifier
    pub id: String,
    /// Designation
    pub name: String,
    /// Hazard flag as assessed by NASA
    pub is_potentially_hazardous_asteroid: bool,
    /// Size estimate
    pub estimated_diameter: Diameter,
    /// Close approach events, the feed gives one per day queried
    pub close_approach_data: Vec<Approach>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Diameter {
    pub kilometers: DiameterRange,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Approach {
    /// Full timestamp of the closest point
    pub close_approach_date_full: Option<String>,
    /// How far it misses us
    pub miss_distance: MissDistance,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MissDistance {
    /// Kilometres, string-encoded by the API
    #[serde_as(as = "DisplayFromStr")]
    pub kilometers: f64,
}

/// NeoWs feed reply, entries are keyed by date.
///
#[derive(Debug, Deserialize)]
struct NeoFeedReply {
    near_earth_objects: BTreeMap<String, Vec<Neo>>,
}

/// One Mars rover photo.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RoverPhoto {
    /// API identifier
    pub id: i64,
    /// Mission sol the photo was taken on
    pub sol: u32,
    /// Photo URL
    pub img_src: String,
    /// `YYYY-MM-DD` on Earth
    pub earth_date: String,
    /// Which rover took it
    pub rover: Rover,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Rover {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct MarsReply {
    photos: Vec<RoverPhoto>,
}

impl Nasa {
    #[tracing::instrument]
    pub fn new() -> Self {
        trace!("nasa::new");

        Nasa {
            base_url: "".to_owned(),
            apod: "".to_owned(),
            neo: "".to_owned(),
            mars: "".to_owned(),
            api_key: "".to_owned(),
            client: Client::new(),
        }
    }

    /// Load some data from in-memory loaded config
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, site: &Site) -> &mut Self {
        trace!("nasa::load");

        self.base_url = site.base_url.to_owned();
        self.apod = site.route("apod").unwrap().to_owned();
        self.neo = site.route("neo").unwrap().to_owned();
        self.mars = site.route("mars").unwrap().to_owned();
        match &site.auth {
            Some(Auth::Key { api_key }) => {
                self.api_key = api_key.to_owned();
            }
            _ => {
                error!("Bad auth parameter for {:?}", site.name);
                panic!("nope");
            }
        }
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, agent())
            .query(query)
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => (),
            code => {
                let h = resp.headers().clone();
                return Err(SourceError::Status(code.as_u16(), format!("{:?}", h)));
            }
        }

        Ok(resp.json().await?)
    }

    /// Astronomy pictures, either random or for a given date.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn fetch_apod(&self, query: ApodQuery) -> Result<Vec<ApodEntry>, SourceError> {
        let url = format!("{}{}", self.base_url, self.apod);
        trace!("Fetching APOD from {}…", url);

        let mut params = vec![("api_key", self.api_key.clone())];
        match query {
            ApodQuery::Count(n) => params.push(("count", n.to_string())),
            ApodQuery::Date(d) => params.push(("date", d.format("%Y-%m-%d").to_string())),
        }

        let reply: ApodReply = self.get_json(&url, &params).await?;
        let entries = match reply {
            ApodReply::Many(list) => list,
            ApodReply::One(one) => vec![*one],
        };
        debug!("{} APOD entries", entries.len());
        Ok(entries)
    }

    /// Close approaches for one single day.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn fetch_neo(&self, day: NaiveDate) -> Result<Vec<Neo>, SourceError> {
        let url = format!("{}{}", self.base_url, self.neo);
        trace!("Fetching NEO feed from {}…", url);

        let day = day.format("%Y-%m-%d").to_string();
        let params = vec![
            ("api_key", self.api_key.clone()),
            ("start_date", day.clone()),
            ("end_date", day.clone()),
        ];

        let reply: NeoFeedReply = self.get_json(&url, &params).await?;
        let neos = reply.near_earth_objects.get(&day).cloned().unwrap_or_default();
        debug!("{} NEO for {}", neos.len(), day);
        Ok(neos)
    }

    /// Rover photos for one sol.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn fetch_mars_photos(&self, sol: u32) -> Result<Vec<RoverPhoto>, SourceError> {
        let url = format!("{}{}", self.base_url, self.mars);
        trace!("Fetching Mars photos from {}…", url);

        let params = vec![("api_key", self.api_key.clone()), ("sol", sol.to_string())];

        let reply: MarsReply = self.get_json(&url, &params).await?;
        debug!("{} photos for sol {}", reply.photos.len(), sol);
        Ok(reply.photos)
    }
}

impl Default for Nasa {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> Nasa {
        let mut c = Nasa::new();
        c.base_url = server.base_url();
        c.apod = "/planetary/apod".to_string();
        c.neo = "/neo/rest/v1/feed".to_string();
        c.mars = "/mars-photos/api/v1/rovers/curiosity/photos".to_string();
        c.api_key = "TEST_KEY".to_string();
        c
    }

    #[tokio::test]
    async fn test_fetch_apod_single() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/planetary/apod")
                    .query_param("api_key", "TEST_KEY")
                    .query_param("date", "2025-01-15");
                then.status(200).json_body(json!({
                    "title": "A Galaxy",
                    "date": "2025-01-15",
                    "url": "https://example.org/g.jpg",
                    "hdurl": null,
                    "explanation": "Far away."
                }));
            })
            .await;

        let c = client_for(&server);
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let entries = c.fetch_apod(ApodQuery::Date(day)).await.unwrap();
        assert_eq!(1, entries.len());
        assert_eq!("A Galaxy", entries[0].title);
    }

    #[tokio::test]
    async fn test_fetch_apod_many() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/planetary/apod")
                    .query_param("count", "2");
                then.status(200).json_body(json!([
                    {"title": "One", "date": "2025-01-01", "url": "u1", "explanation": "e1"},
                    {"title": "Two", "date": "2025-01-02", "url": "u2", "explanation": "e2"}
                ]));
            })
            .await;

        let c = client_for(&server);
        let entries = c.fetch_apod(ApodQuery::Count(2)).await.unwrap();
        assert_eq!(2, entries.len());
    }

    #[tokio::test]
    async fn test_fetch_neo() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/neo/rest/v1/feed")
                    .query_param("start_date", "2025-03-01")
                    .query_param("end_date", "2025-03-01");
                then.status(200).json_body(json!({
                    "near_earth_objects": {
                        "2025-03-01": [{
                            "id": "54016",
                            "name": "(2020 SO)",
                            "is_potentially_hazardous_asteroid": false,
                            "estimated_diameter": {
                                "kilometers": {
                                    "estimated_diameter_min": 0.004,
                                    "estimated_diameter_max": 0.010
                                }
                            },
                            "close_approach_data": [{
                                "close_approach_date_full": "2025-Mar-01 12:00",
                                "miss_distance": {"kilometers": "1234567.89"}
                            }]
                        }]
                    }
                }));
            })
            .await;

        let c = client_for(&server);
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let neos = c.fetch_neo(day).await.unwrap();
        assert_eq!(1, neos.len());
        assert_eq!("(2020 SO)", neos[0].name);
        assert_eq!(
            1_234_567.89,
            neos[0].close_approach_data[0].miss_distance.kilometers
        );
    }

    #[tokio::test]
    async fn test_fetch_mars_photos() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/mars-photos/api/v1/rovers/curiosity/photos")
                    .query_param("sol", "1000");
                then.status(200).json_body(json!({
                    "photos": [{
                        "id": 102693,
                        "sol": 1000,
                        "img_src": "https://example.org/m.jpg",
                        "earth_date": "2015-05-30",
                        "rover": {"name": "Curiosity"}
                    }]
                }));
            })
            .await;

        let c = client_for(&server);
        let photos = c.fetch_mars_photos(1000).await.unwrap();
        assert_eq!(1, photos.len());
        assert_eq!("Curiosity", photos[0].rover.name);
    }
}
