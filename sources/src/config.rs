//! Main configuration management and loading
//!

use std::collections::btree_map::{Iter, Keys, Values};
use std::collections::BTreeMap;
use std::fs;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

use cosmicview_common::{makepath, ConfigFile, Versioned};

use crate::{Site, SourceError, CONFIG};

/// Current version of the configuration file format.
const CVERSION: usize = 1;

/// List of sources, this is the only exposed struct from here.
///
#[derive(Debug)]
pub struct Sources(BTreeMap<String, Site>);

impl Sources {
    /// Load configuration from either the specified file, the default one or,
    /// failing both, the built-in list.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>) -> Result<Sources> {
        let s = match ConfigFile::<Sites>::load(fname, CONFIG) {
            Ok(cfg) => match cfg.inner() {
                Some(s) => s.clone(),
                None => Sites::builtin()?,
            },
            // No file found, stay with the built-in list unless one was
            // explicitly asked for.
            //
            Err(e) => {
                if fname.is_some() {
                    return Err(e);
                }
                trace!("no config file, using builtin defaults");
                Sites::builtin()?
            }
        };

        if s.version() != CVERSION {
            return Err(eyre!("Bad sources file version, aborting…"));
        }

        let mut sources: BTreeMap<String, Site> = BTreeMap::new();
        s.site.iter().for_each(|(name, site)| {
            let mut site = site.clone();
            site.name = Some(name.clone());
            sources.insert(name.clone(), site);
        });
        Ok(Sources(sources))
    }

    /// Install default files
    ///
    pub fn install_defaults(dir: &Path) -> std::io::Result<()> {
        // Create config directory if needed
        //
        if !dir.exists() {
            create_dir_all(dir)?
        }

        // Copy content of `sources.hcl` into place.
        //
        let fname: PathBuf = makepath!(dir.to_string_lossy(), CONFIG);
        let content = include_str!("sources.hcl");
        fs::write(fname, content)
    }

    /// Fetch a site by name or fail.
    ///
    pub fn site(&self, name: &str) -> Result<&Site, SourceError> {
        self.0
            .get(name)
            .ok_or_else(|| SourceError::UnknownSite(name.to_string()))
    }

    /// Wrap `get`
    ///
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Site> {
        self.0.get(name)
    }

    /// Wrap `is_empty()`
    ///
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wrap `len()`
    ///
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Wrap `keys()`
    ///
    #[inline]
    pub fn keys(&self) -> Keys<'_, String, Site> {
        self.0.keys()
    }

    /// Wrap `values()`
    ///
    #[inline]
    pub fn values(&self) -> Values<'_, String, Site> {
        self.0.values()
    }

    /// Wrap `contains_key()`
    ///
    #[inline]
    pub fn contains_key(&self, s: &str) -> bool {
        self.0.contains_key(s)
    }

    /// Wrap `iter()`
    ///
    #[inline]
    pub fn iter(&self) -> Iter<'_, String, Site> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Sources {
    type Item = (&'a String, &'a Site);
    type IntoIter = Iter<'a, String, Site>;

    /// We can now do `sources.iter()`
    ///
    fn into_iter(self) -> Iter<'a, String, Site> {
        self.0.iter()
    }
}

// -----

/// Main struct holding configurations internally
///
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
struct Sites {
    version: usize,
    site: BTreeMap<String, Site>,
}

impl Sites {
    /// The built-in `sources.hcl`.
    ///
    fn builtin() -> Result<Sites> {
        ConfigFile::<Sites>::from_str(include_str!("sources.hcl"))
    }
}

impl Versioned for Sites {
    fn version(&self) -> usize {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Auth, Kind};

    fn set_default() -> Sources {
        Sources::load(None).unwrap()
    }

    #[test]
    fn test_sources_builtin_version() {
        let s = Sites::builtin().unwrap();
        assert_eq!(CVERSION, s.version());
    }

    #[test]
    fn test_sources_loading() {
        let s = set_default();

        assert!(!s.is_empty());
        assert_eq!(5, s.len());

        for (name, site) in s.iter() {
            assert_eq!(Some(name.clone()), site.name);
            match name.as_str() {
                "opennotify" => {
                    assert_eq!(Kind::OpenNotify, site.kind().unwrap());
                    assert!(site.has("position"));
                    assert!(site.has("roster"));
                }
                "nominatim" => {
                    assert!(site.has("reverse"));
                }
                "nasa" => {
                    assert!(matches!(site.auth, Some(Auth::Key { .. })));
                    assert!(site.has("apod"));
                    assert!(site.has("neo"));
                    assert!(site.has("mars"));
                }
                "spacex" => {
                    assert!(site.has("upcoming"));
                }
                "sfnews" => {
                    assert!(site.has("articles"));
                }
                _ => panic!("unexpected site {name}"),
            }
        }
    }

    #[test]
    fn test_sources_install_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cosmicview");

        Sources::install_defaults(&target).unwrap();
        assert!(target.join(CONFIG).exists());

        let s = Sources::load(target.join(CONFIG).to_str()).unwrap();
        assert_eq!(5, s.len());
    }

    #[test]
    fn test_sources_site_unknown() {
        let s = set_default();
        assert!(s.site("bar").is_err());
        assert!(s.site("spacex").is_ok());
    }
}
