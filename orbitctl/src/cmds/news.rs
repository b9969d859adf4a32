//! This is the module handling the `news` sub-command.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use cosmicview_sources::{Sources, SpaceflightNews};

use crate::NewsOpts;

/// Fetch and display the latest space news.
///
#[tracing::instrument(skip(sources))]
pub async fn news(sources: &Sources, opts: &NewsOpts) -> Result<()> {
    trace!("news");

    let site = sources.site("sfnews")?;
    let client = SpaceflightNews::new().load(site).clone();

    let articles = client.fetch_articles(opts.limit).await?;

    let mut builder = Builder::default();
    builder.push_record(vec!["Published", "Title", "Link"]);
    articles.iter().for_each(|article| {
        builder.push_record(vec![
            article.published_at.to_string(),
            article.title.clone(),
            article.url.clone(),
        ]);
    });

    let table = builder.build().with(Style::modern()).to_string();
    println!("Latest space news:\n{}", table);
    Ok(())
}
