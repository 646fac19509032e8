//! Read models for CQRS-lite pattern
//!
//! The analysis result is the write side; the report read model is the
//! denormalized view every formatter renders and the `merge` command reads
//! back.

mod report_read_model;
mod report_read_model_builder;

pub use report_read_model::{ReportMetadataView, ReportReadModel, SummaryView};
pub use report_read_model_builder::ReportReadModelBuilder;
