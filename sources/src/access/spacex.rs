//! SpaceX (spacexdata.com) launch schedule.
//!
//! One route, `upcoming`, returning all scheduled launches in no particular
//! order.  We sort by `date_utc` ascending so the next launch is the head of
//! the list.
//!

use chrono::{DateTime, Utc};
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{agent, Site, SourceError};

/// This is the SpaceX client/source struct.
///
#[derive(Clone, Debug)]
pub struct SpaceX {
    /// Base site url taken from config
    pub base_url: String,
    /// Add this to `base_url` to fetch upcoming launches
    pub upcoming: String,
    /// reqwest async client
    pub client: Client,
}

/// One scheduled launch.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Launch {
    /// API identifier
    pub id: String,
    /// Mission name
    pub name: String,
    /// Scheduled time
    pub date_utc: DateTime<Utc>,
    /// Mission description, often absent
    pub details: Option<String>,
    /// Assorted links
    #[serde(default)]
    pub links: Links,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Links {
    /// Mission patch images
    pub patch: Option<Patch>,
    /// Live stream
    pub webcast: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Patch {
    pub small: Option<String>,
    pub large: Option<String>,
}

impl SpaceX {
    #[tracing::instrument]
    pub fn new() -> Self {
        trace!("spacex::new");

        SpaceX {
            base_url: "".to_owned(),
            upcoming: "".to_owned(),
            client: Client::new(),
        }
    }

    /// Load some data from in-memory loaded config
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, site: &Site) -> &mut Self {
        trace!("spacex::load");

        self.base_url = site.base_url.to_owned();
        self.upcoming = site.route("upcoming").unwrap().to_owned();
        self
    }

    /// All upcoming launches, earliest first.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn fetch_upcoming(&self) -> Result<Vec<Launch>, SourceError> {
        let url = format!("{}{}", self.base_url, self.upcoming);
        trace!("Fetching launches from {}…", url);

        let resp = self
            .client
            .get(&url)
            .header(USER_AGENT, agent())
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => (),
            code => {
                let h = resp.headers().clone();
                return Err(SourceError::Status(code.as_u16(), format!("{:?}", h)));
            }
        }

        let mut launches: Vec<Launch> = resp.json().await?;
        debug!("{} upcoming launches", launches.len());

        launches.sort_by_key(|l| l.date_utc);
        Ok(launches)
    }

    /// Earliest upcoming launch, if any.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn next_launch(&self) -> Result<Option<Launch>, SourceError> {
        Ok(self.fetch_upcoming().await?.into_iter().next())
    }
}

impl Default for SpaceX {
    fn default() -> Self {
        Self::new()
    }
}

/// Time left until `launch`, as the usual `1d 2h 3m 4s` string.
///
pub fn countdown(launch: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = launch - now;
    if diff.num_seconds() <= 0 {
        return "Launch is happening now!".to_string();
    }

    let days = diff.num_days();
    let hours = diff.num_hours() % 24;
    let minutes = diff.num_minutes() % 60;
    let seconds = diff.num_seconds() % 60;

    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_countdown_future() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let launch = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!("1d 3h 4m 5s", countdown(launch, now));
    }

    #[test]
    fn test_countdown_past() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let launch = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        assert_eq!("Launch is happening now!", countdown(launch, now));
    }

    #[tokio::test]
    async fn test_fetch_upcoming_sorted() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/launches/upcoming");
                then.status(200).json_body(json!([
                    {"id": "b", "name": "Later", "date_utc": "2030-06-01T00:00:00.000Z", "details": null, "links": {}},
                    {"id": "a", "name": "Sooner", "date_utc": "2030-01-01T00:00:00.000Z", "details": "cargo run", "links": {"webcast": "https://example.org/live"}}
                ]));
            })
            .await;

        let mut c = SpaceX::new();
        c.base_url = server.base_url();
        c.upcoming = "/v4/launches/upcoming".to_string();

        let launches = c.fetch_upcoming().await.unwrap();
        assert_eq!(2, launches.len());
        assert_eq!("Sooner", launches[0].name);

        let next = c.next_launch().await.unwrap().unwrap();
        assert_eq!("a", next.id);
    }
}
