//! This is the module handling the `launches` sub-command.
//!

use chrono::Utc;
use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use cosmicview_sources::{countdown, Sources, SpaceX};

use crate::LaunchOpts;

/// How many launches we show in the list view.
const MAX_SHOWN: usize = 5;

/// Fetch and display upcoming launches, or just the next one with its
/// countdown.
///
#[tracing::instrument(skip(sources))]
pub async fn launches(sources: &Sources, opts: &LaunchOpts) -> Result<()> {
    trace!("launches");

    let site = sources.site("spacex")?;
    let client = SpaceX::new().load(site).clone();

    if opts.next {
        match client.next_launch().await? {
            Some(launch) => {
                println!("Next launch: {} at {}", launch.name, launch.date_utc);
                println!("T-minus {}", countdown(launch.date_utc, Utc::now()));
            }
            None => println!("No upcoming launch."),
        }
        return Ok(());
    }

    let launches = client.fetch_upcoming().await?;

    let mut builder = Builder::default();
    builder.push_record(vec!["Name", "Date (UTC)", "Details"]);
    launches.iter().take(MAX_SHOWN).for_each(|launch| {
        let details = launch
            .details
            .clone()
            .unwrap_or_else(|| "No mission details available.".to_string());
        builder.push_record(vec![
            launch.name.clone(),
            launch.date_utc.to_string(),
            details,
        ]);
    });

    let table = builder.build().with(Style::modern()).to_string();
    println!("Upcoming launches:\n{}", table);
    Ok(())
}
