//! This is the module handling the `mars` sub-command.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use cosmicview_sources::{Nasa, Sources};

use crate::MarsOpts;

/// How many photos we show.
const MAX_SHOWN: usize = 12;

/// Fetch and display Mars rover photos for one sol.
///
#[tracing::instrument(skip(sources))]
pub async fn mars(sources: &Sources, opts: &MarsOpts) -> Result<()> {
    trace!("mars");

    let site = sources.site("nasa")?;
    let client = Nasa::new().load(site).clone();

    let photos = client.fetch_mars_photos(opts.sol).await?;

    let mut builder = Builder::default();
    builder.push_record(vec!["Rover", "Sol", "Earth date", "Photo"]);
    photos.iter().take(MAX_SHOWN).for_each(|photo| {
        builder.push_record(vec![
            photo.rover.name.clone(),
            photo.sol.to_string(),
            photo.earth_date.clone(),
            photo.img_src.clone(),
        ]);
    });

    let table = builder.build().with(Style::modern()).to_string();
    println!("Mars photos (sol {}):\n{}", opts.sol, table);
    Ok(())
}
