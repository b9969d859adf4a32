//! Module describing all possible commands and sub-commands to the
//! `orbitctl` main driver.
//!
//! Most commands are one fetch-and-print: `crew`, `launches`, `news`,
//! `apod`, `neo`, `mars`.  `track` starts the live polling loop and keeps
//! printing until interrupted.  `favorites` manages the local list of saved
//! picture URLs.
//!
//! `completion` is here just to configure the various shells completion
//! system.
//!

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{crate_authors, crate_description, crate_name, crate_version, Parser, ValueEnum};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode (hierarchical trace output).
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Display utility full version.
    #[clap(short = 'V', long)]
    pub version: bool,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `apod [-d date | -n count]`
/// `completion SHELL`
/// `crew`
/// `favorites (add|remove|list) [URL]`
/// `launches [--next]`
/// `list sources`
/// `mars [-s sol]`
/// `neo`
/// `news [-n limit]`
/// `track [--no-follow] [-d secs] [-p secs]`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Astronomy picture(s) of the day
    Apod(ApodOpts),
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Who is aboard the station right now
    Crew,
    /// Manage the list of favourite pictures
    Favorites(FavOpts),
    /// Upcoming launches
    Launches(LaunchOpts),
    /// List configured things
    List(ListOpts),
    /// Mars rover photos
    Mars(MarsOpts),
    /// Today's near-Earth objects
    Neo,
    /// Latest space news
    News(NewsOpts),
    /// Live station tracking
    Track(TrackOpts),
    /// Display all versions
    Version,
}

// ------

/// Options for the APOD gallery.
///
#[derive(Debug, Parser)]
pub struct ApodOpts {
    /// Picture for one specific date instead of a random gallery.
    #[clap(short = 'd', long)]
    pub date: Option<NaiveDate>,
    /// Number of random pictures to fetch.
    #[clap(short = 'n', long, default_value = "9")]
    pub count: u32,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

/// This contains only the `favorites` sub-commands.
///
#[derive(Debug, Parser)]
pub struct FavOpts {
    /// Sub-commands
    #[clap(subcommand)]
    pub subcmd: FavSubCommand,
}

/// All `favorites` sub-commands:
///
/// `favorites add URL`
/// `favorites remove URL`
/// `favorites list`
///
#[derive(Debug, Parser)]
pub enum FavSubCommand {
    /// Add a picture URL (adding it again removes it)
    Add(FavUrl),
    /// Remove a picture URL
    Remove(FavUrl),
    /// Show the saved list
    List,
}

#[derive(Debug, Parser)]
pub struct FavUrl {
    /// Picture URL
    pub url: String,
}

// ------

/// Options for the launch schedule.
///
#[derive(Debug, Parser)]
pub struct LaunchOpts {
    /// Only the next launch, with its countdown.
    #[clap(long)]
    pub next: bool,
}

// ------

/// All `list` sub-commands:
///
/// `list sources`
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(value_parser)]
    pub cmd: ListSubCommand,
}

/// These are the sub-commands for `list`
///
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum ListSubCommand {
    /// List all sources from `sources.hcl`
    Sources,
}

// ------

/// Options for the Mars gallery.
///
#[derive(Debug, Parser)]
pub struct MarsOpts {
    /// Mission sol to fetch photos for.
    #[clap(short = 's', long, default_value = "1000")]
    pub sol: u32,
}

// ------

/// Options for the news feed.
///
#[derive(Debug, Parser)]
pub struct NewsOpts {
    /// How many articles.
    #[clap(short = 'n', long, default_value = "6")]
    pub limit: usize,
}

// ------

/// Options for the live tracking loop.
///
#[derive(Debug, Parser)]
pub struct TrackOpts {
    /// Leave the viewport alone instead of following the station.
    #[clap(long)]
    pub no_follow: bool,
    /// Stop after that many seconds instead of running until Ctrl-C.
    #[clap(short = 'd', long)]
    pub duration: Option<u64>,
    /// Poll period in seconds.
    #[clap(short = 'p', long, default_value = "5")]
    pub period: u64,
}
