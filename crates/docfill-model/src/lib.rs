//! `docfill-model` defines the in-memory document graph that the docfill
//! synchronization passes mutate.
//!
//! The crate is intentionally self-contained so it can be shared by:
//! - the synchronization passes in `docfill-sync`
//! - the host layer that loads/saves the OOXML package and resolves parts
//!   (out of scope here) via `serde` (JSON-safe schema)
//!
//! The graph covers only the parts that need cross-part synchronization:
//! worksheet rows/cells of a chart's embedded workbook, the shared-string
//! pool, chart series references with their caches, and narrative
//! (WordprocessingML) table rows. Everything else in the package is the
//! host's concern and is never represented here.

mod address;
mod chart;
mod shared_strings;
mod table;
mod value;
mod worksheet;

pub use address::{col_to_name, name_to_col, CellRef, SheetRange};
pub use chart::{Chart, ChartKind, Document, NumberRef, Series, SeriesPoint, TextRef};
pub use shared_strings::{CellAssignment, SharedStringError, SharedStrings};
pub use table::{NarrativeTable, Paragraph, RunText, TableCell, TableRow, TextRun};
pub use value::{Record, Scalar};
pub use worksheet::{CellKind, EmbeddedWorkbook, SheetCell, SheetRow, TableRegion, Worksheet};
