use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use shelf_layout::{PlacementRule, PlannedTheme};

use crate::error::Result;
use crate::input::ThemeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One planned theme as printed by `shelf plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRow<'a> {
    pub id: &'a ThemeId,
    pub item_count: i64,
    pub naturally_full_width: bool,
    pub is_full_width: bool,
    pub rule: PlacementRule,
}

impl<'a> From<&PlannedTheme<'a, ThemeId>> for PlanRow<'a> {
    fn from(planned: &PlannedTheme<'a, ThemeId>) -> Self {
        Self {
            id: planned.id(),
            item_count: planned.theme.item_count,
            naturally_full_width: planned.decision.naturally_full_width,
            is_full_width: planned.decision.is_full_width,
            rule: planned.decision.rule,
        }
    }
}

pub fn write_plan(
    out: &mut dyn Write,
    planned: &[PlannedTheme<'_, ThemeId>],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, planned),
        OutputFormat::Json => write_json(out, planned),
    }
}

fn write_text(out: &mut dyn Write, planned: &[PlannedTheme<'_, ThemeId>]) -> Result<()> {
    let id_width = planned
        .iter()
        .map(|p| p.id().to_string().len())
        .max()
        .unwrap_or(0)
        .max(2);
    writeln!(out, "{:<id_width$}  {:>5}  {:<4}  rule", "id", "items", "span")?;
    for p in planned {
        let span = if p.is_full_width() { "full" } else { "half" };
        writeln!(
            out,
            "{:<id_width$}  {:>5}  {:<4}  {}",
            p.id().to_string(),
            p.theme.item_count,
            span,
            p.decision.rule
        )?;
    }
    Ok(())
}

fn write_json(out: &mut dyn Write, planned: &[PlannedTheme<'_, ThemeId>]) -> Result<()> {
    let rows: Vec<PlanRow<'_>> = planned.iter().map(PlanRow::from).collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}
