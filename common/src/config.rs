//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the various
//! configuration files of `cosmicview`.  This is a configuration file/struct
//! neutral loading engine, storing only the base directory and with `load()`
//! read the proper file or the default one.
//!
//! This encapsulates the configuration file, available with `.inner()`.
//!

use std::fmt::Debug;
use std::path::PathBuf;
use std::{env, fs};

use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::makepath;

/// Main name for the directory base
const TAG: &str = "cosmicview";

/// Every configuration file carries a version number for sanity.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

/// Default per-user base directory for all cosmicview files.
///
pub fn config_path() -> PathBuf {
    default_basedir(TAG)
}

fn default_basedir(tag: &str) -> PathBuf {
    match BaseDirs::new() {
        Some(base) => {
            #[cfg(unix)]
            let base = base.home_dir().join(".config").to_string_lossy().to_string();

            #[cfg(windows)]
            let base = base.data_local_dir().to_string_lossy().to_string();

            debug!("base = {base}");
            makepath!(base, tag)
        }
        None => {
            #[cfg(unix)]
            let homedir = env::var("HOME").expect("No HOME variable defined, can not continue");

            #[cfg(windows)]
            let homedir =
                env::var("LOCALAPPDATA").expect("No LOCALAPPDATA variable defined, can not continue");

            debug!("base = {homedir}");

            #[cfg(unix)]
            let base: PathBuf = makepath!(homedir, ".config", tag);

            #[cfg(windows)]
            let base: PathBuf = makepath!(homedir, tag);

            base
        }
    }
}

/// Wrapper around a deserialized configuration file of type `T`.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + Versioned> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    inner: Option<T>,
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + Versioned,
{
    fn new(tag: &str) -> Self {
        ConfigFile {
            basedir: default_basedir(tag),
            inner: None,
        }
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self, fname: &str) -> PathBuf {
        let cfg = self.config_path().join(fname);
        debug!("default = {cfg:?}");
        cfg
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - `default` inside the default basedir (based on $HOME or $LOCALAPPDATA)
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>, default: &str) -> Result<ConfigFile<T>> {
        let mut cfg = ConfigFile::<T>::new(TAG);

        let fname = match fname {
            Some(fname) => PathBuf::from(fname),
            None => cfg.default_file(default),
        };

        let fname = if fname.exists() {
            fname.canonicalize()?
        } else {
            return Err(eyre!(
                "Unknown config file {:?} and no default in {:?}",
                fname,
                cfg.config_path()
            ));
        };

        trace!("Loading config file {fname:?} from {:?}", cfg.config_path());

        let data = fs::read_to_string(fname)?;
        cfg.inner = Some(Self::from_str(&data)?);
        Ok(cfg)
    }

    /// Parse a configuration string.
    ///
    pub fn from_str(data: &str) -> Result<T> {
        let data: T = hcl::from_str(data)?;
        debug!("struct data = {data:?}");
        Ok(data)
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> Option<&T> {
        self.inner.as_ref()
    }
}
