//! Command dispatch for the `sigtree` binary.

use crate::args::{CliArgs, Command};
use crate::config::{find_config, load_config};
use anyhow::{Context, Result};
use serde::Serialize;
use sigtree_parser::{NamePattern, SignatureParser, TypeTree};
use sigtree_solver::{CachingResolver, Divergence, InheritanceGraph, TreeComparator, TypeMismatch};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Process exit status of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// The command ran but its check failed: a strict comparison did not
    /// match, or `find` found nothing.
    Failure,
}

impl ExitStatus {
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareReport<'a> {
    left: String,
    right: String,
    grade: i8,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    divergence: Option<DivergenceReport<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DivergenceReport<'a> {
    source_type: &'a str,
    target_type: &'a str,
    grade: i8,
    path: &'a [usize],
}

impl<'a> From<&'a Divergence> for DivergenceReport<'a> {
    fn from(divergence: &'a Divergence) -> Self {
        Self {
            source_type: &divergence.source_type,
            target_type: &divergence.target_type,
            grade: divergence.grade.code(),
            path: &divergence.path,
        }
    }
}

/// Run one command, writing its result to `out`.
///
/// Descriptor, pattern and config errors are returned as `Err`; a failed
/// check is reported through [`ExitStatus::Failure`].
pub fn run(args: &CliArgs, cwd: &Path, out: &mut impl Write) -> Result<ExitStatus> {
    match &args.command {
        Command::Parse { descriptor, json } => run_parse(descriptor, *json, out),
        Command::Compare {
            left,
            right,
            strict,
            json,
        } => {
            let graph = load_resolver(args.config.as_deref(), cwd)?;
            run_compare(&graph, left, right, *strict, *json, out)
        }
        Command::Find {
            descriptor,
            pattern,
        } => run_find(descriptor, pattern, out),
    }
}

/// Build the inheritance graph from an explicit config, the nearest
/// `sigtree.json`, or nothing.
pub fn load_resolver(config: Option<&Path>, cwd: &Path) -> Result<InheritanceGraph> {
    let path = match config {
        Some(path) => Some(cwd.join(path)),
        None => find_config(cwd),
    };

    match path {
        Some(path) => {
            debug!(config = %path.display(), "loading hierarchy config");
            Ok(load_config(&path)?.into_graph())
        }
        None => {
            warn!("no hierarchy config found; differing type names compare as unrelated");
            Ok(InheritanceGraph::new())
        }
    }
}

fn parse_descriptor(descriptor: &str) -> Result<TypeTree> {
    SignatureParser::parse(descriptor).with_context(|| format!("invalid descriptor `{descriptor}`"))
}

fn run_parse(descriptor: &str, json: bool, out: &mut impl Write) -> Result<ExitStatus> {
    let tree = parse_descriptor(descriptor)?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &tree.snapshot())?;
        writeln!(out)?;
    } else {
        writeln!(out, "{tree}")?;
    }
    Ok(ExitStatus::Success)
}

fn run_compare(
    graph: &InheritanceGraph,
    left: &str,
    right: &str,
    strict: bool,
    json: bool,
    out: &mut impl Write,
) -> Result<ExitStatus> {
    let left_tree = parse_descriptor(left)?;
    let right_tree = parse_descriptor(right)?;

    let resolver = CachingResolver::new(graph);
    let comparator = TreeComparator::new(&resolver);
    let grade = comparator.graded_compare(left_tree.root(), right_tree.root());

    let mismatch: Option<TypeMismatch> = if strict {
        comparator
            .strict_compare(left_tree.root(), Some(right_tree.root()))
            .err()
    } else {
        None
    };
    debug!(%grade, cached = resolver.cached_pairs(), "comparison finished");

    if json {
        let report = CompareReport {
            left: left_tree.to_string(),
            right: right_tree.to_string(),
            grade: grade.code(),
            error: mismatch.as_ref().map(ToString::to_string),
            divergence: mismatch
                .as_ref()
                .and_then(TypeMismatch::divergence)
                .map(DivergenceReport::from),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{grade}")?;
        if let Some(mismatch) = &mismatch {
            writeln!(out, "error: {mismatch}")?;
            if let Some(divergence) = mismatch.divergence() {
                writeln!(out, "  first difference: {divergence}")?;
            }
        }
    }

    Ok(if mismatch.is_some() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

fn run_find(descriptor: &str, pattern: &str, out: &mut impl Write) -> Result<ExitStatus> {
    let tree = parse_descriptor(descriptor)?;
    let pattern =
        NamePattern::new(pattern).with_context(|| format!("invalid name pattern `{pattern}`"))?;

    match tree.root().first_child_matching(&pattern) {
        Some(child) => {
            writeln!(out, "{child}")?;
            Ok(ExitStatus::Success)
        }
        None => Ok(ExitStatus::Failure),
    }
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
