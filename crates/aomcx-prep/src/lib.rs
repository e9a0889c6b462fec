pub mod manifest;
pub mod report;

use aomcx_core::PrepError;
use aomcx_domain::{load_context, prepare, PrepOutcome};

use crate::manifest::PrepPlan;
use crate::report::PrepSummary;

/// Load the plan's files and run every preparation stage.
pub fn run(plan: &PrepPlan) -> Result<(PrepOutcome, PrepSummary), PrepError> {
    let ctx = load_context(&plan.files, plan.dims, plan.source, plan.media.clone())?
        .with_detectors(plan.detectors.clone())
        .with_unit(plan.unit_in_mm)
        .with_options(plan.options.clone());
    let outcome = prepare(ctx)?;
    let summary = PrepSummary::new(plan, &outcome);
    Ok((outcome, summary))
}
