// ============================================================
// Layer 1 — Renderers
// ============================================================
// Turns Outcomes (and error messages) into text.
//
//   TableRenderer — the fixed-width tables of the menu program
//   JsonRenderer  — one JSON object per line, for scripting
//
// Example manifest (table):
//
//       CAR:                                LOAD:
//         Num   Length (m)     Weight (t)  |    Name      Weight (t)   Value ($)   Dangerous
//       ===================================+===================================================
//   ->    1     10.0           20.0        |    Coal      30.0         400.00            No
//
// Reference: Rust Book §10 (Traits), std::fmt width/precision syntax

use std::io::{self, Write};

use crate::application::operator::{Direction, Outcome};
use crate::cli::commands::OutputFormat;
use crate::domain::report::{format_money, ManifestRow, ProductSummary, EMPTY_LOAD};
use crate::domain::train::CursorMove;

/// Anything that can present the results of a session.
pub trait Renderer {
    fn render(&self, out: &mut dyn Write, outcome: &Outcome) -> io::Result<()>;

    /// Show a recoverable failure
    fn error(&self, out: &mut dyn Write, message: &str) -> io::Result<()>;
}

/// Pick the renderer for an output format
pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Table => Box::new(TableRenderer),
        OutputFormat::Json  => Box::new(JsonRenderer),
    }
}

// ─── Tables ───────────────────────────────────────────────────────────────────

pub struct TableRenderer;

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// The one-row load table used for removals and searches
fn write_load_table(
    out:       &mut dyn Write,
    name:      &str,
    weight:    f64,
    value:     f64,
    dangerous: bool,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{:<4}{:<10}{:<13}{:<12}{:<12}",
        " ", "Name", "Weight (t)", "Value ($)", "Dangerous"
    )?;
    writeln!(out, "{}", "=".repeat(51))?;
    writeln!(
        out,
        "{:<4}{:<10}{:<13.1}{:<18}{:<3}",
        " ",
        name,
        weight,
        format_money(value),
        yes_no(dangerous)
    )?;
    writeln!(out)
}

fn write_manifest(out: &mut dyn Write, rows: &[ManifestRow]) -> io::Result<()> {
    writeln!(out, "{:<4}{:<36}{:<34}", " ", "CAR:", "LOAD:")?;
    writeln!(
        out,
        "{:<6}{:<6}{:<14}{:<13}{:<5}{:<10}{:<13}{:<12}{:<9}",
        " ", "Num", "Length (m)", " Weight (t)", "|", "Name", "Weight (t)", "Value ($)", "Dangerous"
    )?;
    writeln!(out, "    {}+{}", "=".repeat(35), "=".repeat(51))?;

    for row in rows {
        writeln!(
            out,
            "{:<6}{:<6}{:<15.1}{:<12.1}{:<5}{:<10}{:<13.1}{:<18.2}{:<3}",
            if row.is_cursor { "->" } else { " " },
            row.position,
            row.car_length,
            row.car_weight,
            "|",
            row.load_name,
            row.load_weight,
            row.load_value,
            yes_no(row.dangerous),
        )?;
    }
    writeln!(out)
}

fn write_search(out: &mut dyn Write, summary: &ProductSummary) -> io::Result<()> {
    if !summary.is_found() {
        return writeln!(out, "No record of {} on board train.\n", summary.name);
    }
    writeln!(out, "The following products were found on {} cars:", summary.match_count)?;
    write_load_table(
        out,
        &summary.name,
        summary.total_weight,
        summary.total_value,
        summary.any_dangerous,
    )
}

impl Renderer for TableRenderer {
    fn render(&self, out: &mut dyn Write, outcome: &Outcome) -> io::Result<()> {
        match outcome {
            Outcome::CursorMoved { direction, result } => {
                let line = match (direction, result) {
                    (Direction::Forward, CursorMove::Moved)       => "Cursor moved forward.",
                    (Direction::Forward, CursorMove::AtBoundary)  => "No next car; cannot move cursor forward.",
                    (Direction::Backward, CursorMove::Moved)      => "Cursor moved backward.",
                    (Direction::Backward, CursorMove::AtBoundary) => "No previous car, cannot move cursor backward.",
                };
                writeln!(out, "{line}\n")
            }

            Outcome::CarInserted { car } => writeln!(
                out,
                "New train car ({:.1} meters, {:.1} tons) connected to the train.\n",
                car.length(),
                car.weight()
            ),

            Outcome::CarRemoved { car } => {
                writeln!(out, "Car successfully unlinked. The following load has been removed from the train: ")?;
                match car.load() {
                    Some(l) => write_load_table(out, l.name(), l.weight(), l.value(), l.is_dangerous()),
                    None    => write_load_table(out, EMPTY_LOAD, 0.0, 0.0, false),
                }
            }

            Outcome::LoadSet { load, .. } => writeln!(
                out,
                "{:.1} tons of {} added to the current car.\n",
                load.weight(),
                load.name()
            ),

            Outcome::ProductFound { summary } => write_search(out, summary),

            Outcome::Train { summary } => writeln!(out, "{summary}\n"),

            Outcome::Manifest { rows } => write_manifest(out, rows),

            Outcome::DangerousCarsRemoved { removed } => writeln!(
                out,
                "Dangerous cars successfully removed from the train ({} removed).\n",
                removed.len()
            ),
        }
    }

    fn error(&self, out: &mut dyn Write, message: &str) -> io::Result<()> {
        writeln!(out, "{message}\n")
    }
}

// ─── JSON ─────────────────────────────────────────────────────────────────────

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, out: &mut dyn Write, outcome: &Outcome) -> io::Result<()> {
        serde_json::to_writer(&mut *out, outcome)?;
        writeln!(out)
    }

    fn error(&self, out: &mut dyn Write, message: &str) -> io::Result<()> {
        let doc = serde_json::json!({ "event": "error", "message": message });
        serde_json::to_writer(&mut *out, &doc)?;
        writeln!(out)
    }
}
