use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EmbeddedWorkbook, NarrativeTable};

/// One cached point of a series (`c:pt`: `@idx` plus `c:v` text).
///
/// `value` is the external text form; `None` mirrors an absent `c:v` for a
/// null dataset value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub idx: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A range-bound numeric series reference (`c:numRef`): the source range
/// formula plus the cached points rendered from it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberRef {
    /// Source range, e.g. `Sheet1!$B$2:$B$5`. Not every reference is
    /// range-bound; static/decorative series carry arbitrary text here.
    pub formula: String,
    pub cache: Vec<SeriesPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_code: Option<String>,
}

/// A range-bound string series reference (`c:strRef`), used by category axes
/// and series names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRef {
    pub formula: String,
    pub cache: Vec<SeriesPoint>,
}

/// One chart series (`c:ser`), reduced to its range-bound references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// Series name reference (`c:tx/c:strRef`). Typically bound to a header
    /// cell, which the synchronizer deliberately leaves untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextRef>,
    /// Category labels (`c:cat/c:strRef`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<TextRef>,
    /// Numeric values (`c:val/c:numRef`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<NumberRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Unknown { name: String },
}

impl Default for ChartKind {
    fn default() -> Self {
        ChartKind::Unknown {
            name: String::new(),
        }
    }
}

/// A chart part of the document, reduced to what synchronization touches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    /// Package part name supplied by the host, for diagnostics
    /// (e.g. `word/charts/chart1.xml`).
    pub part_name: String,
    pub kind: ChartKind,
    pub series: Vec<Series>,
    /// Relationship id of the embedded workbook holding the chart's source
    /// data (`c:externalData/@r:id`). `None` for inline/static charts, which
    /// need no synchronization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workbook_rel_id: Option<String>,
}

/// The document object graph handed in (and back) by the host library.
///
/// Keys are the host's stable identifiers: embedded workbooks by the chart's
/// relationship id, narrative tables by bookmark name. The graph is borrowed
/// for the duration of a synchronization call and mutated in place; no
/// component retains references across calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub charts: Vec<Chart>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub embedded_workbooks: BTreeMap<String, EmbeddedWorkbook>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tables: BTreeMap<String, NarrativeTable>,
}
