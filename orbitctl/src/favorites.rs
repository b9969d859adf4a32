//! Local favourites list.
//!
//! A plain JSON file with the saved picture URLs, one `{url}` record each,
//! kept under the per-user config directory.  Adding a URL that is already
//! there removes it instead, which is how the original gallery behaves.
//!

use std::fs;
use std::path::{Path, PathBuf};

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::trace;

use cosmicview_common::config_path;

/// On-disk file name.
const FAVORITES: &str = "favorites.json";

/// One saved picture.
///
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Favorite {
    /// Picture URL
    pub url: String,
}

/// The list itself plus where it lives.
///
#[derive(Debug)]
pub struct Favorites {
    /// Backing file
    path: PathBuf,
    /// Saved records, in insertion order
    list: Vec<Favorite>,
}

impl Favorites {
    /// Load from the default location, an absent file is an empty list.
    ///
    #[tracing::instrument]
    pub fn open() -> Result<Self> {
        Self::open_at(config_path().join(FAVORITES))
    }

    /// Load from a specific file.
    ///
    #[tracing::instrument]
    pub fn open_at(path: PathBuf) -> Result<Self> {
        trace!("favorites::open_at({path:?})");

        let list = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            vec![]
        };
        Ok(Favorites { path, list })
    }

    /// Add `url`, or remove it when already present.  Returns true when the
    /// URL ended up in the list.
    ///
    pub fn toggle(&mut self, url: &str) -> bool {
        if self.remove(url) {
            return false;
        }
        self.list.push(Favorite {
            url: url.to_string(),
        });
        true
    }

    /// Remove `url`, returns true when it was there.
    ///
    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.list.len();
        self.list.retain(|f| f.url != url);
        before != self.list.len()
    }

    /// Saved records, in insertion order.
    ///
    pub fn list(&self) -> &[Favorite] {
        &self.list
    }

    /// Where the list lives.
    ///
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the list back.
    ///
    #[tracing::instrument(skip(self))]
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let data = serde_json::to_string_pretty(&self.list)?;
        Ok(fs::write(&self.path, data)?)
    }
}
