//! Report generation for Folio.
//!
//! A report is a page (or a set of pages) computed from the project rather
//! than written by hand. This crate defines:
//!
//! - the [`Sink`] reports write into, and the [`SinkFactory`] multi-page
//!   reports use to open auxiliary pages;
//! - the report contract ([`ReportDescriptor`], [`SinglePageReport`],
//!   [`MultiPageReport`]);
//! - [`ReportExecution`], a configured report plus the identity of the
//!   generator that provides it;
//! - [`ReportRunner`], which checks and invokes reports and turns their
//!   failures into per-report outcomes;
//! - the built-in project information reports and command-backed reports.
//!
//! # Failure tiers
//!
//! | Failure                          | Outcome                                  |
//! |----------------------------------|------------------------------------------|
//! | [`ReportError`] from the report  | [`ReportFailure::Generation`], omitted    |
//! | panic inside the report          | [`ReportFailure::Panicked`], omitted      |
//! | [`ReportError::Unavailable`]     | warning, [`ReportOutcome::Skipped`]       |
//!
//! None of these abort the site build.

mod builtin;
mod command;
mod error;
mod execution;
mod report;
mod runner;
mod sink;

pub use builtin::project_info_reports;
pub use command::CommandReport;
pub use error::{ReportError, ReportFailure};
pub use execution::{ReportExecution, configured_reports, filter_generatable};
pub use report::{MultiPageReport, Report, ReportContext, ReportDescriptor, SinglePageReport};
pub use runner::{ReportOutcome, ReportPages, ReportRunner};
pub use sink::{Cell, MultiPageSinkFactory, Sink, SinkFactory, escape};
