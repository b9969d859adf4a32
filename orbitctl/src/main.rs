use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::trace;

use cosmicview_common::init_logging;
use cosmicview_sources::Sources;
use orbitctl::{
    apod, crew, handle_favorites, launches, list_sources, mars, neo, news, track, ListSubCommand,
    Opts, SubCommand,
};

/// Binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(NAME, opts.debug, None)?;

    // Config is just the source list for now.
    //
    let cfn = opts.config.as_deref().and_then(|p| p.to_str());
    let sources = Sources::load(cfn)?;

    // Banner
    //
    banner()?;

    handle_subcmd(&sources, &opts).await
}

async fn handle_subcmd(sources: &Sources, opts: &Opts) -> Result<()> {
    match &opts.subcmd {
        // Handle `apod`
        //
        SubCommand::Apod(aopts) => {
            trace!("apod");

            apod(sources, aopts).await?;
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and
        //       vice-versa.  Not worth trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Handle `crew`
        //
        SubCommand::Crew => {
            trace!("crew");

            crew(sources).await?;
        }

        // Handle `favorites`
        //
        SubCommand::Favorites(fopts) => {
            trace!("favorites");

            handle_favorites(fopts)?;
        }

        // Handle `launches`
        //
        SubCommand::Launches(lopts) => {
            trace!("launches");

            launches(sources, lopts).await?;
        }

        // Standalone `list` command
        //
        SubCommand::List(lopts) => match lopts.cmd {
            ListSubCommand::Sources => {
                let str = list_sources(sources)?;
                eprintln!("{}", str);
            }
        },

        // Handle `mars`
        //
        SubCommand::Mars(mopts) => {
            trace!("mars");

            mars(sources, mopts).await?;
        }

        // Handle `neo`
        //
        SubCommand::Neo => {
            trace!("neo");

            neo(sources).await?;
        }

        // Handle `news`
        //
        SubCommand::News(nopts) => {
            trace!("news");

            news(sources, nopts).await?;
        }

        // Handle `track`
        //
        SubCommand::Track(topts) => {
            trace!("track");

            track(sources, topts).await?;
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", cosmicview_sources::version());
            eprintln!("\t{}", cosmicview_tracker::version());
            eprintln!("\t{}", cosmicview_common::version());
        }
    }
    Ok(())
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
