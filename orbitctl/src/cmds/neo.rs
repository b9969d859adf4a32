//! This is the module handling the `neo` sub-command.
//!

use chrono::Utc;
use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use cosmicview_sources::{Nasa, Sources};

/// Fetch and display today's near-Earth objects.
///
#[tracing::instrument(skip(sources))]
pub async fn neo(sources: &Sources) -> Result<()> {
    trace!("neo");

    let site = sources.site("nasa")?;
    let client = Nasa::new().load(site).clone();

    let today = Utc::now().date_naive();
    let neos = client.fetch_neo(today).await?;

    let mut builder = Builder::default();
    builder.push_record(vec![
        "Name",
        "Close approach",
        "Miss (km)",
        "Diameter (km)",
        "Hazardous",
    ]);
    neos.iter().for_each(|neo| {
        let approach = neo.close_approach_data.first();
        let when = approach
            .and_then(|a| a.close_approach_date_full.clone())
            .unwrap_or_default();
        let miss = approach
            .map(|a| format!("{:.0}", a.miss_distance.kilometers))
            .unwrap_or_default();
        let diameter = format!(
            "{:.3} - {:.3}",
            neo.estimated_diameter.kilometers.estimated_diameter_min,
            neo.estimated_diameter.kilometers.estimated_diameter_max
        );
        let hazard = if neo.is_potentially_hazardous_asteroid {
            "Yes"
        } else {
            "No"
        };
        builder.push_record(vec![
            neo.name.clone(),
            when,
            miss,
            diameter,
            hazard.to_string(),
        ]);
    });

    let table = builder.build().with(Style::modern()).to_string();
    println!("Near-Earth objects for {}:\n{}", today, table);
    Ok(())
}
