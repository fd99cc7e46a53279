//! Synchronization passes over the `docfill-model` document graph.
//!
//! A pre-authored template carries three coupled views of the same data: an
//! embedded workbook, the chart series caches range-bound to it, and
//! optionally a narrative table. Given a runtime dataset, this crate rewrites
//! all three in place so they stay mutually consistent:
//!
//! - [`sync_worksheet`]/[`sync_workbook`] rewrite an embedded workbook's data
//!   rows from its header row plus the dataset, and recompute any declared
//!   structured-table extent.
//! - [`sync_chart`] re-resolves each series reference's source column and
//!   rebuilds its cache from the dataset, rewriting the range formula for the
//!   new row count.
//! - [`expand_table`] clones a template table row per input record,
//!   format-preserving.
//! - [`fill_document`] sequences the above over a whole document and collects
//!   per-part failures into a [`SyncReport`].
//!
//! The pass is single-threaded and exclusive by design: shared-string
//! indices are pool-wide and assigned incrementally, so the document graph
//! must not be read or written concurrently with a synchronization call.
//! Within one call, the embedded workbook is always rewritten before its
//! chart's caches; both derive from the same header-row column mapping.

mod chart;
mod report;
mod sheet;
mod table;

pub use chart::{fill_document, sync_chart, ChartSyncOutcome, DocumentSyncError};
pub use report::{Diagnostic, Severity, SyncReport};
pub use sheet::{sync_workbook, sync_worksheet, SheetSyncError};
pub use table::{expand_table, TableExpandError};
