pub mod guide;
pub mod header;
pub mod layout;
pub mod metrics;
pub mod table;

use std::collections::BTreeMap;

use anyhow::Result;
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::catalog::SourceKind;
use crate::db::{self, FetchedPage};

/// One extracted attribute value. Model attribute records are `Map`s whose
/// leaves are scalars or lists; wireless sub-model groups nest one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    Map(BTreeMap<String, FeatureValue>),
}

/// The per-family feature mapping: model id or family-level key → value.
pub type Features = BTreeMap<String, FeatureValue>;

impl FeatureValue {
    pub fn text(s: impl Into<String>) -> FeatureValue {
        FeatureValue::Text(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Features> {
        match self {
            FeatureValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// One datasheet page's output: the family concept plus its feature map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyRecord {
    pub family: String,
    pub features: Features,
}

/// Everything one fetched page can yield.
pub enum PageOutput {
    Datasheet(FamilyRecord),
    CliGuide(Vec<guide::GuideRecord>),
    AdminGuide(Vec<guide::ArticleRecord>),
}

/// Parse one fetched page to completion. Layout dispatch and the derived
/// metrics pass for datasheets, section segmentation for guides. Never
/// fails: a page that matches nothing yields an empty record set.
pub fn process_page(page: &FetchedPage) -> PageOutput {
    let doc = Html::parse_document(&page.html);
    match page.kind {
        SourceKind::Datasheet => {
            let kind = layout::classify(&page.concept);
            let mut features = layout::dispatch(kind, &doc);
            metrics::resolve(&mut features, kind);
            PageOutput::Datasheet(FamilyRecord {
                family: page.concept.clone(),
                features,
            })
        }
        SourceKind::CliGuide => PageOutput::CliGuide(guide::parse_cli_guide(&doc, &page.url)),
        SourceKind::AdminGuide => PageOutput::AdminGuide(guide::parse_admin_guide(&doc, &page.url)),
    }
}

/// Flatten CLI guide records into persistable rows, one JSON blob per
/// record keyed by its document id.
pub fn cli_record_rows(
    page_data_id: i64,
    records: &[guide::GuideRecord],
) -> Result<Vec<db::GuideRecordRow>> {
    records
        .iter()
        .map(|r| {
            let (doc_id, topic, command_name) = match r {
                guide::GuideRecord::Command(c) => {
                    (c.meta.doc_id.clone(), c.topic.clone(), c.command_name.clone())
                }
                guide::GuideRecord::Introduction(i) => {
                    (i.meta.doc_id.clone(), i.topic.clone(), i.command_name.clone())
                }
            };
            Ok(db::GuideRecordRow {
                page_data_id,
                doc_id,
                topic,
                command_name: Some(command_name),
                record: serde_json::to_string(r)?,
            })
        })
        .collect()
}
