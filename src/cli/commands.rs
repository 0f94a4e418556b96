//! Command implementations

use crate::check::{run_doc_check, CheckStats, DocCheckMode};
use crate::config::{CheckConfig, CONFIG_FILE_NAME};
use crate::diagnostics::{count_by_kind, Diagnostic, DiagnosticEngine, Severity};
use crate::markup::MarkupDocProvider;
use crate::model::DeclTree;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of checking one or more declaration dumps
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Mode the run used
    pub mode: DocCheckMode,
    /// Number of modules checked
    pub modules: usize,
    /// Counters summed over all modules
    pub stats: CheckStats,
    /// Diagnostics in emission order, module by module
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the run should fail
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

/// Expand the given paths into dump files
///
/// Directories are searched recursively for `*.json` files; the result is
/// sorted so runs are reproducible.
pub fn collect_dumps(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut dumps = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
                .collect();
            found.sort();
            dumps.extend(found);
        } else if path.exists() {
            dumps.push(path.clone());
        } else {
            anyhow::bail!("Input not found: {:?}", path);
        }
    }

    Ok(dumps)
}

/// Check every dump under `paths`
pub fn check(paths: &[PathBuf], config: &CheckConfig) -> Result<CheckReport> {
    let dumps = collect_dumps(paths)?;
    let provider = MarkupDocProvider::new();

    let mut report = CheckReport {
        mode: config.mode,
        modules: 0,
        stats: CheckStats::default(),
        diagnostics: Vec::new(),
    };

    for dump in &dumps {
        let tree = DeclTree::load(dump)
            .with_context(|| format!("Failed to load declaration dump: {:?}", dump))?;

        tracing::debug!(
            path = %dump.display(),
            module = tree.module(),
            decls = tree.len(),
            "loaded declaration dump"
        );

        let mut engine = DiagnosticEngine::new().with_warnings_as_errors(config.deny_warnings);
        let stats = run_doc_check(&tree, config.mode, &provider, &mut engine);

        report.modules += 1;
        report.stats.merge(stats);
        report.diagnostics.extend(engine.into_diagnostics());
    }

    Ok(report)
}

/// Diagnostic as written in JSON output
#[derive(Debug, Serialize)]
struct DiagnosticRecord<'a> {
    file: &'a str,
    line: u32,
    column: u32,
    severity: Severity,
    id: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ReportRecord<'a> {
    mode: DocCheckMode,
    modules: usize,
    checked: usize,
    exempt: usize,
    counts: BTreeMap<&'static str, usize>,
    diagnostics: Vec<DiagnosticRecord<'a>>,
}

/// Print a report in JSON format
pub fn print_report_json(report: &CheckReport) -> Result<()> {
    let record = ReportRecord {
        mode: report.mode,
        modules: report.modules,
        checked: report.stats.checked,
        exempt: report.stats.exempt,
        counts: count_by_kind(&report.diagnostics)
            .into_iter()
            .map(|(kind, count)| (kind.id(), count))
            .collect(),
        diagnostics: report
            .diagnostics
            .iter()
            .map(|d| DiagnosticRecord {
                file: &d.loc.file,
                line: d.loc.line,
                column: d.loc.column,
                severity: d.severity,
                id: d.kind.id(),
                message: d.message(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&record)?;
    println!("{}", json);
    Ok(())
}

/// Print a report in text format
pub fn print_report_text(report: &CheckReport) {
    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }

    if report.diagnostics.is_empty() {
        println!(
            "✓ No documentation issues ({} declarations checked in {} module(s))",
            report.stats.checked, report.modules
        );
        return;
    }

    println!();
    println!(
        "{} documentation issue(s) in {} module(s):",
        report.diagnostics.len(),
        report.modules
    );
    for (kind, count) in count_by_kind(&report.diagnostics) {
        println!("  {:<28} {}", kind.id(), count);
    }
}

/// Print the effective configuration
pub fn show_config(config: &CheckConfig) -> Result<()> {
    println!("DocCheck Configuration");
    println!("======================\n");
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write a default configuration file into `dir`
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);

    if path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {:?}. Use --force to overwrite.",
            path
        );
    }

    CheckConfig::default().save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    const DUMP: &str = r#"{
        "module": "Demo",
        "decls": [
            { "kind": "func", "name": "f", "access": "public",
              "loc": { "file": "Demo.swift", "line": 1, "column": 13 },
              "doc": "/// - Parameter x: The x value.",
              "params": [ { "label": "x", "name": "x" }, { "label": "y", "name": "y" } ],
              "signature": { "result": "String", "throws": true } }
        ]
    }"#;

    #[test]
    fn test_collect_dumps_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.json"), DUMP).unwrap();
        std::fs::write(dir.path().join("nested").join("a.json"), DUMP).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let dumps = collect_dumps(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(dumps.len(), 2);
        assert!(dumps.iter().all(|p| p.extension().unwrap() == "json"));
    }

    #[test]
    fn test_collect_dumps_missing_input() {
        assert!(collect_dumps(&[PathBuf::from("/definitely/not/here.json")]).is_err());
    }

    #[test]
    fn test_check_report() {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("demo.json");
        std::fs::write(&dump, DUMP).unwrap();

        let config = CheckConfig {
            mode: DocCheckMode::Consistency,
            deny_warnings: false,
        };
        let report = check(&[dump.clone()], &config).unwrap();
        assert_eq!(report.modules, 1);
        let kinds: Vec<_> = report.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::MissingParamDescription,
                DiagnosticKind::MissingReturnDescription,
                DiagnosticKind::MissingThrowsDescription,
            ]
        );
        assert!(!report.has_errors());

        let strict = config.with_overrides(Some(DocCheckMode::PresenceOnly), true);
        let report = check(&[dump], &strict).unwrap();
        assert!(report.diagnostics.is_empty());
        assert!(!report.has_errors());
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_config(dir.path(), false).unwrap();
        assert!(path.exists());
        assert!(init_config(dir.path(), false).is_err());
        assert!(init_config(dir.path(), true).is_ok());
    }
}
