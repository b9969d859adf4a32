//! This is the module handling the `apod` sub-command.
//!

use eyre::Result;
use tracing::trace;

use cosmicview_sources::{ApodQuery, Nasa, Sources};

use crate::ApodOpts;

/// Fetch and display astronomy pictures of the day.
///
#[tracing::instrument(skip(sources))]
pub async fn apod(sources: &Sources, opts: &ApodOpts) -> Result<()> {
    trace!("apod");

    let site = sources.site("nasa")?;
    let client = Nasa::new().load(site).clone();

    let query = match opts.date {
        Some(date) => ApodQuery::Date(date),
        None => ApodQuery::Count(opts.count),
    };
    let entries = client.fetch_apod(query).await?;

    for entry in &entries {
        println!("{} - {}", entry.date, entry.title);
        if let Some(url) = entry.hdurl.as_ref().or(entry.url.as_ref()) {
            println!("  {}", url);
        }
        println!("  {}\n", entry.explanation);
    }
    Ok(())
}
