//! This is the module handling the `crew` sub-command.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use cosmicview_sources::{OpenNotify, Sources};

/// Fetch and display the current station crew.
///
#[tracing::instrument(skip(sources))]
pub async fn crew(sources: &Sources) -> Result<()> {
    trace!("crew");

    let site = sources.site("opennotify")?;
    let client = OpenNotify::new().load(site).clone();

    let crew = client.fetch_crew().await?;

    let mut builder = Builder::default();
    builder.push_record(vec!["Name", "Craft"]);
    crew.iter().for_each(|astro| {
        builder.push_record(vec![astro.name.as_str(), astro.craft.as_str()]);
    });

    let table = builder.build().with(Style::modern()).to_string();
    println!("Crew aboard ({}):\n{}", crew.len(), table);
    Ok(())
}
