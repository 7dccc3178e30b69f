use std::io::Write;

use anyhow::Result;
use matkul_core::{GraphError, GraphSnapshot, Outcome, ParseError};

pub const UNKNOWN_COMMAND: &str = "Perintah tidak ditemukan";

/// How outcomes are written to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Repeat each command line before its output.
    pub echo: bool,

    /// Render dumps as JSON instead of `[IN]`/`[OU]` lines.
    pub json: bool,
}

pub fn outcome(out: &mut impl Write, outcome: &Outcome, options: &Options) -> Result<()> {
    match outcome {
        Outcome::Updated | Outcome::Exit => {}
        Outcome::Sorted(names) => writeln!(out, "{}", names.join(", "))?,
        Outcome::Dump(snapshot) if options.json => {
            writeln!(out, "{}", serde_json::to_string_pretty(snapshot)?)?
        }
        Outcome::Dump(snapshot) => dump(out, snapshot)?,
    }
    Ok(())
}

fn dump(out: &mut impl Write, snapshot: &GraphSnapshot) -> Result<()> {
    for course in &snapshot.courses {
        writeln!(out, "[IN]  {} value is {:?}", course.name, course.prerequisites)?;
    }
    for course in &snapshot.courses {
        writeln!(out, "[OU]  {} value is {:?}", course.name, course.dependents)?;
    }
    Ok(())
}

pub fn graph_error(out: &mut impl Write, err: &GraphError) -> Result<()> {
    match err {
        GraphError::AlreadyExists { name } => writeln!(out, "Matkul {} sudah ada", name)?,
        GraphError::NotFound { name } | GraphError::PrerequisiteNotFound { name } => {
            writeln!(out, "Matkul {} tidak ditemukan", name)?
        }
        GraphError::CycleDetected { path } => {
            writeln!(out, "Siklus prasyarat terdeteksi: {}", path.join(" -> "))?
        }
        GraphError::Heap(err) => writeln!(out, "{}", err)?,
    }
    Ok(())
}

pub fn parse_error(out: &mut impl Write, err: &ParseError) -> Result<()> {
    match err {
        ParseError::Empty => {}
        ParseError::UnknownCommand { .. } => writeln!(out, "{}", UNKNOWN_COMMAND)?,
        ParseError::MissingCourseName { keyword } => {
            writeln!(out, "{} membutuhkan nama matkul", keyword)?
        }
    }
    Ok(())
}
