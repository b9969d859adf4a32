//! This is the module handling the `list` sub-command.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use cosmicview_sources::{Auth, Sources};

/// List all configured sources.
///
#[tracing::instrument(skip(sources))]
pub fn list_sources(sources: &Sources) -> Result<String> {
    trace!("list_sources");

    let header = vec!["Name", "Kind", "Base URL", "Auth", "Routes"];

    let mut builder = Builder::default();
    builder.push_record(header);

    sources.iter().for_each(|(name, site)| {
        let auth = match &site.auth {
            Some(auth) => format!("{}", auth),
            None => "none".to_string(),
        };
        let routes = site
            .list()
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        builder.push_record(vec![
            name.clone(),
            site.kind.clone(),
            site.base_url.clone(),
            auth,
            routes,
        ]);
    });

    let table = builder.build().with(Style::modern()).to_string();
    Ok(format!("Listing all sources:\n{}", table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sources() {
        let sources = Sources::load(None).unwrap();
        let str = list_sources(&sources).unwrap();
        assert!(str.contains("opennotify"));
        assert!(str.contains("nominatim"));
        assert!(!str.contains("DEMO_KEY"));
    }
}
