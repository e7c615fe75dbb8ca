//! The publishing ledger.
//!
//! The ledger is a JSON document kept next to the index. Per destination service it holds
//! a template of record fields and the records already published:
//!
//! ```json
//! {"publish": {"youtube": {"template": {"tags": ["audiobook"]}, "items": []}}}
//! ```
//!
//! It is only ever read here.

use std::{borrow::Cow, collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::PlanError;

/// A JSON object, as used for template fields and published records.
pub type Record = Map<String, Value>;

/// The whole ledger document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Ledger {
    /// Per-service publishing state, keyed by service name.
    #[serde(default)]
    pub publish: BTreeMap<String, ServiceLedger>,
}

/// Publishing state for one service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServiceLedger {
    /// Field overrides applied to every new record.
    #[serde(default)]
    pub template: Record,
    /// Records already published, oldest first.
    #[serde(default)]
    pub items: Vec<Record>,
}

impl Ledger {
    /// Reads and parses the ledger at `path`.
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let content = fs::read_to_string(path).map_err(|source| PlanError::ReadLedger {
            path: path.to_path_buf(),
            source,
        })?;
        let ledger = Self::parse(&content, path)?;
        debug!(path = %path.display(), services = ledger.publish.len(), "loaded ledger");
        Ok(ledger)
    }

    /// Reads the ledger at `path`, or returns an empty ledger if there is no such file.
    pub fn load_or_default(path: &Path) -> Result<Self, PlanError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no ledger, starting empty");
            Ok(Self::default())
        }
    }

    /// Parses a ledger held in memory. `path` is used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self, PlanError> {
        serde_json::from_str(content).map_err(|source| PlanError::ParseLedger {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the state for `service`, empty if the ledger has none.
    pub fn service(&self, service: &str) -> Cow<'_, ServiceLedger> {
        self.publish
            .get(service)
            .map_or_else(|| Cow::Owned(ServiceLedger::default()), Cow::Borrowed)
    }

    /// Returns the names of all services in the ledger, sorted.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.publish.keys().map(String::as_str)
    }
}

impl ServiceLedger {
    /// Returns the `dt_pub` string of the most recently published item, if any.
    pub fn last_published(&self) -> Option<&str> {
        self.items.last()?.get("dt_pub")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const LEDGER: &str = r#"{
  "publish": {
    "youtube": {
      "template": {"tags": ["audiobook"], "dt_pub": "+2d 18:00:00+03:00"},
      "items": [
        {"ident": "01_ch1", "dt_pub": "2024-03-02 18:00:00+03:00"},
        {"ident": "02_ch2", "dt_pub": "2024-03-04 18:00:00+03:00"}
      ]
    },
    "vk": {}
  }
}"#;

    fn ledger() -> Ledger {
        Ledger::parse(LEDGER, Path::new("iamreader.json")).unwrap()
    }

    #[test]
    fn test_parse_services() {
        let ledger = ledger();
        assert_eq!(ledger.services().collect::<Vec<_>>(), vec!["vk", "youtube"]);

        let youtube = ledger.service("youtube");
        assert_eq!(youtube.items.len(), 2);
        assert_eq!(youtube.template["tags"][0], "audiobook");
        assert_eq!(youtube.last_published(), Some("2024-03-04 18:00:00+03:00"));
    }

    #[test]
    fn test_service_without_sections_is_empty() {
        let ledger = ledger();
        let vk = ledger.service("vk");
        assert!(vk.template.is_empty());
        assert!(vk.items.is_empty());
        assert_eq!(vk.last_published(), None);
    }

    #[test]
    fn test_unknown_service_is_empty() {
        let ledger = ledger();
        let missing = ledger.service("rutube");
        assert!(matches!(missing, Cow::Owned(_)));
        assert_eq!(*missing, ServiceLedger::default());
    }

    #[test]
    fn test_missing_publish_key() {
        let ledger = Ledger::parse("{}", Path::new("iamreader.json")).unwrap();
        assert!(ledger.publish.is_empty());
        assert!(ledger.service("youtube").items.is_empty());
    }

    #[test]
    fn test_last_published_without_date() {
        let ledger = Ledger::parse(
            r#"{"publish": {"yt": {"items": [{"ident": "01_a"}]}}}"#,
            Path::new("iamreader.json"),
        )
        .unwrap();
        assert_eq!(ledger.service("yt").last_published(), None);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = Ledger::parse("{\"publish\": [", Path::new("res/iamreader.json")).unwrap_err();
        assert!(matches!(err, PlanError::ParseLedger { .. }));
        assert!(err.to_string().contains("res/iamreader.json"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LEDGER.as_bytes()).unwrap();

        let ledger = Ledger::load(file.path()).unwrap();
        assert_eq!(ledger, self::ledger());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iamreader.json");

        assert!(matches!(
            Ledger::load(&path),
            Err(PlanError::ReadLedger { .. })
        ));
        assert_eq!(Ledger::load_or_default(&path).unwrap(), Ledger::default());
    }
}
