//! Publishing record materialization.
//!
//! Turns the matched media files plus a service's ledger into the records a publisher
//! would submit next. Files already covered by published items are skipped; the rest get
//! a running counter, titles and descriptions from the outline, and a publication time
//! scheduled after the latest one.

use chrono::NaiveDate;
use iamreader_annotations::{FileMatch, NodeRef};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    PlanError,
    ledger::{Record, ServiceLedger},
    schedule::{RelativeSchedule, published_date},
};

/// Default record fields, in the order they are filled in.
const DEFAULT_FIELDS: [(&str, &str); 4] = [
    ("ident", "{{ ident }}"),
    ("title", "{{ counter }}. {{ title_first }}. {{ title_last }}"),
    ("description", "{{ author_first }}\n{{ title_full_n }}"),
    ("dt_pub", "+1d 12:30:00+00:00"),
];

/// Template fields that default to an empty list.
const LIST_FIELDS: [&str; 2] = ["tags", "playlists"];

/// Values substituted into `{{ key }}` placeholders for one record.
struct Substitutions {
    /// `(key, value)` pairs, applied in order.
    pairs: Vec<(&'static str, String)>,
}

impl Substitutions {
    /// Collects the placeholder values for `node`.
    fn new(node: NodeRef<'_>, ident: &str, counter: String) -> Self {
        let full_title = node.full_title_path(true);
        let first = full_title.first().cloned().unwrap_or_default();
        let last = full_title.last().cloned().unwrap_or_default();

        Self {
            pairs: vec![
                ("counter", counter),
                ("ident", ident.to_string()),
                ("author_first", node.author_of_top_ancestor()),
                ("title_first", first),
                ("title_last", last),
                ("title_full", full_title.join(". ")),
                ("title_full_n", full_title.join("\n")),
            ],
        }
    }

    /// Replaces every known placeholder in string values. Other values pass through.
    fn apply(&self, value: Value) -> Value {
        match value {
            Value::String(mut text) => {
                for (key, replacement) in &self.pairs {
                    let placeholder = format!("{{{{ {key} }}}}");
                    if text.contains(&placeholder) {
                        text = text.replace(&placeholder, replacement);
                    }
                }
                Value::String(text)
            }
            other => other,
        }
    }
}

/// Materializes the next publishing records for one service.
///
/// 1. Only files with a node take part, in iteration order; others are skipped with a
///    warning.
/// 2. The first `service.items.len()` of them are considered published and skipped.
/// 3. Every other file gets the default fields, overridden by `service.template`, with
///    placeholders filled in. Template keys outside the default fields are ignored.
/// 4. Relative `dt_pub` values are scheduled after the latest publication date, which
///    starts at the last published item's date, or `today` when there is none.
pub fn materialize<'a, I>(
    matches: I,
    service: &ServiceLedger,
    today: NaiveDate,
) -> Result<Vec<Record>, PlanError>
where
    I: IntoIterator<Item = FileMatch<'a>>,
{
    let matched: Vec<(String, String, NodeRef<'a>)> = matches
        .into_iter()
        .filter_map(|file| match file.node {
            Some(node) => Some((file.stem, file.path.display().to_string(), node)),
            None => {
                warn!(file = %file.stem, "no index entry, skipped");
                None
            }
        })
        .collect();

    let counter_width = matched.len().to_string().len();
    let published = service.items.len();
    let mut latest = match service.last_published() {
        Some(dt_pub) => published_date(dt_pub)?,
        None => today,
    };
    debug!(
        files = matched.len(),
        published,
        latest = %latest,
        "materializing records"
    );

    let mut records = Vec::new();
    for (idx, (ident, fpath, node)) in matched.into_iter().enumerate().skip(published) {
        let counter = format!("{:0counter_width$}", idx + 1);
        let substitutions = Substitutions::new(node, &ident, counter);

        let mut record = default_record(fpath);
        for (key, value) in &mut record {
            let chosen = service
                .template
                .get(key)
                .cloned()
                .unwrap_or_else(|| value.take());
            *value = substitutions.apply(chosen);
        }

        if let Some(Value::String(dt_pub)) = record.get_mut("dt_pub")
            && RelativeSchedule::is_relative(dt_pub)
        {
            let (resolved, date) = dt_pub.parse::<RelativeSchedule>()?.resolve(latest)?;
            *dt_pub = resolved;
            latest = date;
        }

        records.push(record);
    }

    Ok(records)
}

/// Returns a record holding every default field.
fn default_record(fpath: String) -> Record {
    let mut record = Record::new();
    for (key, value) in DEFAULT_FIELDS {
        record.insert(key.to_string(), Value::String(value.to_string()));
    }
    for key in LIST_FIELDS {
        record.insert(key.to_string(), Value::Array(Vec::new()));
    }
    record.insert("fpath".to_string(), Value::String(fpath));
    record
}
