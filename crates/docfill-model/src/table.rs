use serde::{Deserialize, Serialize};

/// Text content of a run (`w:t`). `preserve_space` mirrors
/// `xml:space="preserve"`, set on generated runs so literal whitespace in
/// dataset values survives serialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunText {
    pub text: String,
    #[serde(default)]
    pub preserve_space: bool,
}

/// A text run (`w:r`).
///
/// Run properties (`w:rPr`) are kept as an opaque raw-XML blob: the
/// synchronizer clones them from a donor run onto generated rows but never
/// interprets them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props_xml: Option<String>,
    /// `None` renders as a run with no text content (used for empty values).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<RunText>,
}

/// A paragraph (`w:p`) within a table cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
}

/// A table cell (`w:tc`). Cell properties (`w:tcPr`) are opaque raw XML,
/// like run properties.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props_xml: Option<String>,
    pub paragraphs: Vec<Paragraph>,
}

/// A table row (`w:tr`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// A narrative (WordprocessingML) table located by a bookmark, holding the
/// template rows the expander appends to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeTable {
    /// Column count from the grid definition (`w:tblGrid`). Authoritative:
    /// input rows must match this arity exactly.
    pub grid_cols: usize,
    pub rows: Vec<TableRow>,
}
