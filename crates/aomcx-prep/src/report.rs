use std::path::{Path, PathBuf};

use aomcx_core::PrepError;
use aomcx_domain::{MaskReport, PrepOutcome};
use serde::Serialize;

use crate::manifest::{KernelSettings, PrepPlan};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorSummary {
    pub center: [f32; 3],
    pub radius: f32,
    pub coverage: u32,
}

/// What a preparation run did, for humans (markdown) and tools (JSON).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrepSummary {
    pub session: String,
    pub dims: [u32; 3],
    /// Media including air.
    pub media: usize,
    pub unit_in_mm: f32,
    pub source_initial: [f32; 3],
    /// None when the run ended with a mask dump.
    pub source_final: Option<[f32; 3]>,
    pub detectors: Vec<DetectorSummary>,
    pub warnings: Vec<String>,
    pub kernel: KernelSettings,
    pub mask_dump: Option<PathBuf>,
}

impl PrepSummary {
    pub fn new(plan: &PrepPlan, outcome: &PrepOutcome) -> Self {
        let (report, source_final, mask_dump) = match outcome {
            PrepOutcome::Ready(domain) => (&domain.report, Some(domain.source.pos.to_array()), None),
            PrepOutcome::MaskDumped { path, report } => (report, None, Some(path.clone())),
        };
        Self {
            session: plan.options.session.clone(),
            dims: plan.dims.to_array(),
            media: plan.media.len(),
            unit_in_mm: plan.unit_in_mm,
            source_initial: plan.source.pos.to_array(),
            source_final,
            detectors: detector_rows(plan, report),
            warnings: report.warnings.clone(),
            kernel: plan.kernel,
            mask_dump,
        }
    }

    /// Voxels flagged over all detectors, overlaps counted once per detector.
    pub fn total_coverage(&self) -> u64 {
        self.detectors.iter().map(|d| d.coverage as u64).sum()
    }
}

fn detector_rows(plan: &PrepPlan, report: &MaskReport) -> Vec<DetectorSummary> {
    plan.detectors
        .iter()
        .enumerate()
        .map(|(i, det)| DetectorSummary {
            center: det.center.to_array(),
            radius: det.radius,
            coverage: report.coverage.get(i).copied().unwrap_or(0),
        })
        .collect()
}

fn fmt_pos(p: &[f32; 3]) -> String {
    format!("({:.2}, {:.2}, {:.2})", p[0], p[1], p[2])
}

/// Format a summary as markdown.
pub fn format_markdown(summary: &PrepSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("## Domain `{}`\n\n", summary.session));
    out.push_str("| Property | Value |\n");
    out.push_str("|----------|-------|\n");
    out.push_str(&format!(
        "| Dims | {} x {} x {} |\n",
        summary.dims[0], summary.dims[1], summary.dims[2]
    ));
    out.push_str(&format!("| Media (with air) | {} |\n", summary.media));
    out.push_str(&format!("| Unit (mm) | {} |\n", summary.unit_in_mm));
    out.push_str(&format!("| Source | {} |\n", fmt_pos(&summary.source_initial)));
    if let Some(placed) = &summary.source_final {
        if placed != &summary.source_initial {
            out.push_str(&format!("| Source (relocated) | {} |\n", fmt_pos(placed)));
        }
    }
    out.push_str(&format!(
        "| Time gates | {} (max {}) |\n",
        summary.kernel.gates, summary.kernel.max_gates
    ));

    if !summary.detectors.is_empty() {
        out.push_str("\n| Detector | Center | Radius | Voxels |\n");
        out.push_str("|----------|--------|--------|--------|\n");
        for (i, det) in summary.detectors.iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | {:.2} | {} |\n",
                i + 1,
                fmt_pos(&det.center),
                det.radius,
                det.coverage
            ));
        }
    }

    if !summary.warnings.is_empty() {
        out.push_str("\n**Warnings**\n\n");
        for warning in &summary.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
    }

    if let Some(path) = &summary.mask_dump {
        out.push_str(&format!("\nDetector mask written to `{}`.\n", path.display()));
    }
    out
}

/// Save a summary as pretty JSON.
pub fn save_summary(path: &Path, summary: &PrepSummary) -> Result<(), PrepError> {
    let write_err = |source| PrepError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    let json = serde_json::to_string_pretty(summary).map_err(|e| write_err(std::io::Error::other(e)))?;
    std::fs::write(path, json).map_err(write_err)
}
