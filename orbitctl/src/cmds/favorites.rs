//! This is the module handling the `favorites` sub-command.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use crate::favorites::Favorites;
use crate::{FavOpts, FavSubCommand};

/// Add/remove/list over the saved picture list.
///
#[tracing::instrument]
pub fn handle_favorites(opts: &FavOpts) -> Result<()> {
    trace!("favorites");

    let mut favs = Favorites::open()?;
    match &opts.subcmd {
        FavSubCommand::Add(f) => {
            if favs.toggle(&f.url) {
                println!("Added {}", f.url);
            } else {
                println!("Was already there, removed {}", f.url);
            }
            favs.save()?;
        }
        FavSubCommand::Remove(f) => {
            if favs.remove(&f.url) {
                println!("Removed {}", f.url);
                favs.save()?;
            } else {
                println!("Not in the list: {}", f.url);
            }
        }
        FavSubCommand::List => {
            let mut builder = Builder::default();
            builder.push_record(vec!["URL"]);
            favs.list().iter().for_each(|f| {
                builder.push_record(vec![f.url.clone()]);
            });
            let table = builder.build().with(Style::modern()).to_string();
            println!("Favorites ({}):\n{}", favs.list().len(), table);
        }
    }
    Ok(())
}
