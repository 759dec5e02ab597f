//! Plain-text and JSON reports of a project analysis.

use std::fmt::Write;

use serde::Serialize;
use uuid::Uuid;

use rc_core::calculations::{SectionAnalysis, SolveStatus};
use rc_core::{AnalysisSettings, CalcError, CalcResult, Project, ProjectMetadata};

#[derive(Serialize)]
struct JsonReport<'a> {
    meta: &'a ProjectMetadata,
    settings: &'a AnalysisSettings,
    sections: Vec<JsonEntry<'a>>,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    id: Uuid,
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<&'a SectionAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a CalcError>,
}

pub fn json_report(project: &Project, results: &[(Uuid, CalcResult<SectionAnalysis>)]) -> CalcResult<String> {
    let sections = results
        .iter()
        .map(|(id, result)| JsonEntry {
            id: *id,
            label: project.get_item(id).map(|s| s.label.as_str()).unwrap_or(""),
            analysis: result.as_ref().ok(),
            error: result.as_ref().err(),
        })
        .collect();

    let report = JsonReport {
        meta: &project.meta,
        settings: &project.settings,
        sections,
    };
    serde_json::to_string_pretty(&report).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

const RULE: &str = "═══════════════════════════════════════════════════════";

pub fn text_report(project: &Project, results: &[(Uuid, CalcResult<SectionAnalysis>)]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, project, results);
    out
}

fn write_report(
    out: &mut String,
    project: &Project,
    results: &[(Uuid, CalcResult<SectionAnalysis>)],
) -> std::fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  SECTION CAPACITY REPORT  ({})", project.settings.code)?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Job: {}   Client: {}   Engineer: {}",
        project.meta.job_id, project.meta.client, project.meta.engineer
    )?;
    writeln!(out, "εmax = {}", project.settings.ec_max)?;

    for (id, result) in results {
        let label = project.get_item(id).map(|s| s.label.as_str()).unwrap_or("?");
        writeln!(out)?;
        writeln!(out, "── {} ──", label)?;
        match result {
            Ok(analysis) => write_analysis(out, project, id, analysis)?,
            Err(e) => writeln!(out, "  FAILED [{}]: {}", e.error_code(), e)?,
        }
    }
    writeln!(out)?;
    writeln!(out, "{}", RULE)
}

fn write_analysis(out: &mut String, project: &Project, id: &Uuid, analysis: &SectionAnalysis) -> std::fmt::Result {
    if let Some(section) = project.get_item(id) {
        writeln!(
            out,
            "  {}  D = {} mm  {}  {}  bars {}",
            analysis.shape,
            section.depth(),
            section.concrete.label,
            section.main_steel.rebar.label,
            section.main_steel.bar_list()
        )?;
    }

    let eq = &analysis.equilibrium;
    let status = match eq.status {
        SolveStatus::Converged => "converged",
        SolveStatus::Discontinuity => "DISCONTINUITY",
        SolveStatus::IterationLimit => "ITERATION LIMIT",
    };
    writeln!(
        out,
        "  xu = {:.2} mm  ({}, {} iterations, residual {:.2e} N)",
        eq.xu, status, eq.iterations, eq.residual
    )?;

    let flexure = &analysis.flexure;
    writeln!(out, "  Compression:")?;
    for r in &flexure.compression {
        writeln!(out, "    {:<16} C = {:>9.2} kN   M = {:>8.2} kN·m", r.name, r.force.0, r.moment.0)?;
    }
    writeln!(out, "  Tension:")?;
    for r in &flexure.tension {
        writeln!(out, "    {:<16} T = {:>9.2} kN   M = {:>8.2} kN·m", r.name, -r.force.0, r.moment.0)?;
    }
    writeln!(out, "  Mu = {:.2} kN·m", flexure.mu.0)?;
    if let (Some(limit), Some(ductile)) = (flexure.xu_max, flexure.ductile) {
        writeln!(
            out,
            "  xu,max = {:.2} mm  ({})",
            limit,
            if ductile { "under-reinforced" } else { "OVER-REINFORCED" }
        )?;
    }

    if let Some(shear) = &analysis.shear {
        writeln!(
            out,
            "  Shear: d = {:.1} mm, pt = {:.3}%, τc = {:.3} N/mm²",
            shear.effective_depth, shear.pt, shear.tau_c
        )?;
        writeln!(out, "    Vuc = {:.2} kN", shear.vuc.0)?;
        for c in &shear.components {
            writeln!(out, "    {:<16} Vus = {:.2} kN", c.label, c.vus.0)?;
        }
        writeln!(
            out,
            "  Vu = {:.2} kN{}",
            shear.vu.0,
            if shear.capped { "  (limited by τc,max)" } else { "" }
        )?;
    }

    if let Some(point) = &analysis.interaction {
        writeln!(out, "  Pure bending point: Pu = {:.2} kN, Mu = {:.2} kN·m", point.pu.0, point.mu.0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_project;

    #[test]
    fn test_text_report_lists_every_section() {
        let project = demo_project().unwrap();
        let results = project.analyse_all();
        let text = text_report(&project, &results);
        for section in project.items.values() {
            assert!(text.contains(&section.label));
        }
        assert!(text.contains("Mu = 78.48 kN·m"));
    }

    #[test]
    fn test_json_report_parses() {
        let project = demo_project().unwrap();
        let results = project.analyse_all();
        let json = json_report(&project, &results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sections"].as_array().map(|a| a.len()), Some(4));
    }
}
