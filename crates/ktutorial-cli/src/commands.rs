use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use ktutorial_cli::outline::TutorialOutline;
use ktutorial_export::{ExporterType, available_exporter_types, export_errors};
use ktutorial_io::{export_tutorial, load_tutorial, save_tutorial};
use tracing::{info, info_span, warn};

use crate::cli::{CheckArgs, ExportArgs, FormatArgs, InspectArgs};

/// Export the tutorial. Returns the error markers of the written script.
pub fn run_export(args: &ExportArgs) -> Result<Vec<String>> {
    let span = info_span!("export", input = %args.input.display());
    let _guard = span.enter();

    let exporter: ExporterType = args.exporter.parse()?;
    let tutorial = load_tutorial(&args.input)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension(exporter.extension()));

    let script = export_tutorial(&tutorial, exporter, &output)?;
    let errors = export_errors(&script);
    for error in &errors {
        warn!("{error}");
    }
    println!("Exported {} to {}", args.input.display(), output.display());
    Ok(errors)
}

/// Export the tutorial in memory and list its error markers.
pub fn run_check(args: &CheckArgs) -> Result<Vec<String>> {
    let tutorial = load_tutorial(&args.input)?;
    let errors = export_errors(&ExporterType::default().export(&tutorial));
    if errors.is_empty() {
        println!("{}: no problems found", args.input.display());
    } else {
        for error in &errors {
            println!("{}: {error}", args.input.display());
        }
    }
    info!(errors = errors.len(), "checked tutorial");
    Ok(errors)
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let tutorial = load_tutorial(&args.input)?;
    let outline = TutorialOutline::new(&tutorial);

    if args.json {
        let json = serde_json::to_string_pretty(&outline).context("serialize outline")?;
        println!("{json}");
        return Ok(());
    }

    println!("Tutorial: {}", display_or_dash(&outline.name));
    println!(
        "Steps: {}, reactions: {}, condition nodes: {}",
        outline.steps.len(),
        outline.reaction_count(),
        outline.condition_node_count()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Text"),
        header_cell("Trigger"),
        header_cell("Response"),
    ]);
    apply_table_style(&mut table);
    for step in &outline.steps {
        if step.reactions.is_empty() {
            table.add_row(vec![
                Cell::new(display_or_dash(&step.id)),
                Cell::new(&step.text),
                Cell::new("-"),
                Cell::new("-"),
            ]);
        }
        for (index, reaction) in step.reactions.iter().enumerate() {
            let (id, text) = if index == 0 {
                (display_or_dash(&step.id), step.text.as_str())
            } else {
                ("", "")
            };
            table.add_row(vec![
                Cell::new(id),
                Cell::new(text),
                Cell::new(format!(
                    "{}: {}",
                    reaction.trigger_type,
                    display_or_dash(&reaction.trigger)
                )),
                Cell::new(format!(
                    "{}: {}{}",
                    reaction.response_type,
                    display_or_dash(&reaction.response),
                    if reaction.next_step_missing {
                        " (no such step)"
                    } else {
                        ""
                    }
                )),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

/// Rewrite the tutorial in the canonical writer format.
pub fn run_format(args: &FormatArgs) -> Result<PathBuf> {
    let tutorial = load_tutorial(&args.input)?;
    let output = args.output.clone().unwrap_or_else(|| args.input.clone());
    save_tutorial(&tutorial, &output)?;
    println!("Formatted {} into {}", args.input.display(), output.display());
    Ok(output)
}

pub fn run_exporters() {
    for entry in available_exporter_types() {
        println!("{entry}");
    }
}

fn display_or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
