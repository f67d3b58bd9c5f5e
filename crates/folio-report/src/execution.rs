//! Configured reports and their capability filtering.

use std::sync::Arc;

use folio_model::Project;

use crate::builtin::project_info_reports;
use crate::command::CommandReport;
use crate::report::{Report, ReportContext};

/// A configured report together with the generator that provides it.
#[derive(Debug, Clone)]
pub struct ReportExecution {
    pub plugin_id: String,
    pub goal: String,
    pub report: Report,
    /// Declared in `[[reporting.reports]]` rather than enabled by default.
    pub user_defined: bool,
}

impl ReportExecution {
    /// `plugin:goal`.
    #[must_use]
    pub fn identity(&self) -> String {
        format!("{}:{}", self.plugin_id, self.goal)
    }

    #[must_use]
    pub fn output_name(&self) -> &str {
        self.report.descriptor().output_name()
    }
}

/// Every report configured for `project`: built-in reports first (unless
/// excluded), then command reports in declaration order.
#[must_use]
pub fn configured_reports(project: &Project) -> Vec<ReportExecution> {
    let mut executions = Vec::new();
    if !project.reporting.exclude_defaults {
        executions.extend(project_info_reports());
    }
    for config in &project.reporting.reports {
        let report = CommandReport::from_config(config);
        let report = if config.multi_page {
            Report::MultiPage(Arc::new(report))
        } else {
            Report::SinglePage(Arc::new(report))
        };
        executions.push(ReportExecution {
            plugin_id: config.plugin.clone(),
            goal: config.goal.clone(),
            report,
            user_defined: true,
        });
    }
    executions
}

/// Keep the reports whose `can_generate` check passes.
///
/// A check returning false for a user-defined report is logged. A failing
/// check drops the report with an error log.
#[must_use]
pub fn filter_generatable(
    executions: Vec<ReportExecution>,
    ctx: &ReportContext<'_>,
) -> Vec<ReportExecution> {
    executions
        .into_iter()
        .filter(|execution| {
            match execution.report.descriptor().can_generate(ctx) {
                Ok(true) => true,
                Ok(false) => {
                    if execution.user_defined {
                        tracing::info!("Skipping {} report", execution.identity());
                    } else {
                        tracing::debug!(report = %execution.identity(), "Report has nothing to generate");
                    }
                    false
                }
                Err(err) => {
                    tracing::error!(
                        report = %execution.identity(),
                        error = %err,
                        "Error checking whether report can be generated"
                    );
                    false
                }
            }
        })
        .collect()
}
