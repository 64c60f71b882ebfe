//! Single-key lookup in the application server's XML configuration file.
//!
//! The file carries the usual `/configuration/appSettings/add[@key][@value]`
//! schema. Unlike the deployment store, a missing document or key here is a
//! hard `NotFound`: callers ask for settings the application cannot run
//! without.

use std::fs;
use std::path::Path;

use crate::error::{Error, ResourceKind, Result};

/// Reads the value of `key` from the `appSettings` section of the document
/// at `path`.
pub fn read_app_setting(path: impl AsRef<Path>, key: &str) -> Result<String> {
    let path = path.as_ref();
    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::not_found(ResourceKind::File, path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    find_app_setting(&data, key)
        .ok_or_else(|| Error::not_found(ResourceKind::ConfigKey, key))?
}

fn find_app_setting(xml: &str, key: &str) -> Option<Result<String>> {
    let doc = match roxmltree::Document::parse(xml) {
        Ok(d) => d,
        Err(e) => return Some(Err(Error::parse(format!("app config: {e}")))),
    };
    let root = doc.root_element();
    if root.tag_name().name() != "configuration" {
        return Some(Err(Error::parse("app config: missing <configuration> root")));
    }
    root.children()
        .filter(|n| n.has_tag_name("appSettings"))
        .flat_map(|s| s.children())
        .filter(|n| n.has_tag_name("add"))
        .find(|n| n.attribute("key") == Some(key))
        .map(|n| Ok(n.attribute("value").unwrap_or_default().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<configuration>
  <appSettings>
    <add key="DataAccess.Database" value="AxDB" />
    <add key="Aos.MetadataDirectory" value="K:\AosService\PackagesLocalDirectory" />
    <add key="Empty.Value" value="" />
  </appSettings>
</configuration>"#;

    #[test]
    fn reads_present_key() {
        let v = find_app_setting(SAMPLE, "DataAccess.Database").and_then(|r| r.ok());
        assert_eq!(v.as_deref(), Some("AxDB"));
    }

    #[test]
    fn empty_value_is_still_present() {
        let v = find_app_setting(SAMPLE, "Empty.Value").and_then(|r| r.ok());
        assert_eq!(v.as_deref(), Some(""));
    }

    #[test]
    fn missing_key_yields_not_found() {
        assert!(find_app_setting(SAMPLE, "No.Such.Key").is_none());
    }

    #[test]
    fn missing_file_yields_not_found() {
        let err = read_app_setting("/definitely/not/here/web.config", "k");
        assert!(matches!(err, Err(Error::NotFound { kind: ResourceKind::File, .. })));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let out = find_app_setting("<configuration><appSettings>", "k");
        assert!(matches!(out, Some(Err(Error::Parse(_)))));
    }

    #[test]
    fn file_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("web.config");
        std::fs::write(&path, SAMPLE)?;
        assert_eq!(read_app_setting(&path, "DataAccess.Database")?, "AxDB");
        Ok(())
    }
}
