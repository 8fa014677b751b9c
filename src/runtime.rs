// Runtime executor for the attribute DSL

use crate::builders::attr;
use crate::data::{Dataset, Table};
use crate::palette::named_palette;
use crate::parser::ast::{AttrCall, PoolArg};
use crate::scalar::{AttrValue, GroupKey};
use crate::spec::SpecState;
use crate::variants::Encoding;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::rc::Rc;
use tracing::debug;

/// Resolved assignment for one builder call
#[derive(Debug, Clone, Serialize)]
pub struct AttributeReport {
    pub attribute: String,
    pub columns: Vec<String>,
    pub default: Option<AttrValue>,
    /// Positions of the grouping columns among all grouping columns (categorical only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<usize>>,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub key: GroupKey,
    pub value: AttrValue,
}

/// Build every call's specification against `table` and collect the assignments
pub fn assign_attributes(calls: &[AttrCall], table: Table) -> Result<Vec<AttributeReport>> {
    if calls.is_empty() {
        anyhow::bail!("At least one attribute call is required (color, marker, dash or cat)");
    }

    let data: Rc<dyn Dataset> = Rc::new(table);
    let all_columns = grouping_columns(calls);

    let mut reports = Vec::with_capacity(calls.len());
    for call in calls {
        let report = assign_one(call, &data, &all_columns)
            .with_context(|| format!("Failed to assign attribute for {}()", call.encoding))?;
        reports.push(report);
    }
    Ok(reports)
}

fn assign_one(call: &AttrCall, data: &Rc<dyn Dataset>, all_columns: &[String]) -> Result<AttributeReport> {
    let pool = match &call.pool {
        Some(PoolArg::Values(values)) => Some(values.clone()),
        Some(PoolArg::Named(name)) => Some(named_palette(name)?.iter().map(|c| c.to_string()).collect()),
        None => None,
    };

    let mut spec = attr(call.encoding, None, pool, call.options.clone())?;
    spec.configure(Some(Rc::clone(data)), call.columns.clone())?;

    let mut assignments = Vec::new();
    if spec.state() != SpecState::Unconfigured {
        spec.rebuild()?;
        for key in spec.items().to_vec() {
            if let Some(value) = spec.lookup(Some(&key))? {
                assignments.push(Assignment { key, value });
            }
        }
    }
    debug!(attribute = spec.name(), groups = assignments.len(), "assigned attribute");

    let levels = match call.encoding {
        Encoding::Cat => Some(spec.levels(all_columns)?),
        _ => None,
    };

    Ok(AttributeReport {
        attribute: spec.name().to_string(),
        columns: spec.columns().map(|c| c.to_vec()).unwrap_or_default(),
        default: spec.default_value().cloned(),
        levels,
        assignments,
    })
}

/// Union of all grouping columns, in first-mention order
fn grouping_columns(calls: &[AttrCall]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for call in calls {
        if let Some(spec) = &call.columns {
            for col in spec.clone().into_vec() {
                if !columns.contains(&col) {
                    columns.push(col);
                }
            }
        }
    }
    columns
}

/// Plain-text rendering of the reports
pub fn render_table(reports: &[AttributeReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let default = report
            .default
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{} [{}] default={}",
            report.attribute,
            report.columns.join(", "),
            default
        );
        if let Some(levels) = &report.levels {
            let levels: Vec<String> = levels.iter().map(|l| l.to_string()).collect();
            let _ = writeln!(out, "  levels: {}", levels.join(", "));
        }
        for assignment in &report.assignments {
            let _ = writeln!(out, "  {}\t{}", assignment.key, assignment.value);
        }
    }
    out
}
