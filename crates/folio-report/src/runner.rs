//! Report invocation with per-report failure isolation.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::execution::ReportExecution;
use crate::report::{Report, ReportContext};
use crate::sink::{MultiPageSinkFactory, Sink};
use crate::{ReportError, ReportFailure};

/// Pages produced by a report.
#[derive(Debug, Default)]
pub struct ReportPages {
    /// The page named after the report's output name.
    pub main: Sink,
    /// Auxiliary pages, keyed by file name relative to the output directory.
    pub pages: Vec<(String, Sink)>,
}

/// Result of running one report.
#[derive(Debug)]
pub enum ReportOutcome {
    /// Pages to be decorated by the skin.
    Rendered(ReportPages),
    /// The report wrote its own output.
    External,
    /// The report's runtime was unavailable; a warning was logged.
    Skipped,
}

/// Invokes reports, converting errors and panics into [`ReportFailure`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportRunner;

impl ReportRunner {
    /// Generate one report.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportFailure`] carrying the report's identity when the
    /// report fails or panics. The caller logs it and continues.
    pub fn run(
        &self,
        execution: &ReportExecution,
        ctx: &ReportContext<'_>,
    ) -> Result<ReportOutcome, ReportFailure> {
        let descriptor = execution.report.descriptor();
        tracing::info!(
            "Generating \"{}\" report --- {}",
            descriptor.name(ctx.locale),
            execution.identity()
        );

        let result = catch_unwind(AssertUnwindSafe(|| Self::invoke(&execution.report, ctx)));

        match result {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(ReportError::Unavailable(cause))) => {
                tracing::warn!(
                    "Skipping {} report: {cause}. Check that the generator is installed.",
                    execution.identity()
                );
                Ok(ReportOutcome::Skipped)
            }
            Ok(Err(source)) => Err(ReportFailure::Generation {
                plugin: execution.plugin_id.clone(),
                goal: execution.goal.clone(),
                source,
            }),
            Err(payload) => Err(ReportFailure::Panicked {
                plugin: execution.plugin_id.clone(),
                goal: execution.goal.clone(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    fn invoke(report: &Report, ctx: &ReportContext<'_>) -> Result<ReportOutcome, ReportError> {
        let external = report.descriptor().is_external();
        let mut main = Sink::new();
        let pages = match report {
            Report::SinglePage(report) => {
                report.generate(&mut main, ctx)?;
                Vec::new()
            }
            Report::MultiPage(report) => {
                let output_name = report.output_name();
                let main_page = output_name.rsplit('/').next().unwrap_or(output_name);
                let mut factory = MultiPageSinkFactory::for_main_page(main_page);
                report.generate(&mut main, &mut factory, ctx)?;
                factory.into_sinks()
            }
        };
        if external {
            return Ok(ReportOutcome::External);
        }
        main.close();
        Ok(ReportOutcome::Rendered(ReportPages { main, pages }))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
