//! Spaceflight News API (spaceflightnewsapi.net).
//!
//! One route, `articles`, paginated; we only ever ask for the first page with
//! an explicit `limit`.
//!

use chrono::{DateTime, Utc};
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{agent, Site, SourceError};

/// This is the Spaceflight News client/source struct.
///
#[derive(Clone, Debug)]
pub struct SpaceflightNews {
    /// Base site url taken from config
    pub base_url: String,
    /// Add this to `base_url` to fetch articles
    pub articles: String,
    /// reqwest async client
    pub client: Client,
}

/// One news article.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Article {
    /// API identifier
    pub id: i64,
    /// Headline
    pub title: String,
    /// Short abstract
    pub summary: String,
    /// Link to the full article
    pub url: String,
    /// Cover picture, may be absent
    pub image_url: Option<String>,
    /// Publication time
    pub published_at: DateTime<Utc>,
}

/// Paginated reply, we only look at `results`.
///
#[derive(Debug, Deserialize)]
struct ArticlesReply {
    results: Vec<Article>,
}

impl SpaceflightNews {
    #[tracing::instrument]
    pub fn new() -> Self {
        trace!("sfnews::new");

        SpaceflightNews {
            base_url: "".to_owned(),
            articles: "".to_owned(),
            client: Client::new(),
        }
    }

    /// Load some data from in-memory loaded config
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, site: &Site) -> &mut Self {
        trace!("sfnews::load");

        self.base_url = site.base_url.to_owned();
        self.articles = site.route("articles").unwrap().to_owned();
        self
    }

    /// Latest `limit` articles.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn fetch_articles(&self, limit: usize) -> Result<Vec<Article>, SourceError> {
        let url = format!("{}{}", self.base_url, self.articles);
        trace!("Fetching news from {}…", url);

        let resp = self
            .client
            .get(&url)
            .header(USER_AGENT, agent())
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => (),
            code => {
                let h = resp.headers().clone();
                return Err(SourceError::Status(code.as_u16(), format!("{:?}", h)));
            }
        }

        let reply: ArticlesReply = resp.json().await?;
        debug!("{} articles", reply.results.len());

        Ok(reply.results)
    }
}

impl Default for SpaceflightNews {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_articles() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/articles/").query_param("limit", "2");
                then.status(200).json_body(json!({
                    "count": 12345,
                    "results": [
                        {
                            "id": 1,
                            "title": "Starship flies",
                            "summary": "It did.",
                            "url": "https://example.org/1",
                            "image_url": null,
                            "published_at": "2025-05-01T10:00:00Z"
                        },
                        {
                            "id": 2,
                            "title": "New station module",
                            "summary": "Docked.",
                            "url": "https://example.org/2",
                            "image_url": "https://example.org/2.jpg",
                            "published_at": "2025-05-02T10:00:00Z"
                        }
                    ]
                }));
            })
            .await;

        let mut c = SpaceflightNews::new();
        c.base_url = server.base_url();
        c.articles = "/v4/articles/".to_string();

        let articles = c.fetch_articles(2).await.unwrap();
        m.assert_async().await;
        assert_eq!(2, articles.len());
        assert_eq!("Starship flies", articles[0].title);
    }
}
