//! Test utilities for code generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{path::Path, process::Command};

use eyre::{Result, eyre};
use ovsgen_core::NameNormalizer;
use ovsgen_schema::{
    Atom, AtomicType, BaseType, ColumnSchema, ColumnType, DatabaseSchema, Max, RefType,
    TableSchema,
};

use crate::TypeMapper;

/// Error from syntax checking.
#[derive(Debug)]
pub struct CheckError {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CheckError {}

/// Trait for verifying generated code is well formed.
pub trait SyntaxChecker {
    /// Name of the external tool, used to skip checks when it is missing.
    fn tool(&self) -> &'static str;

    /// Check every generated file in the given directory.
    fn check(&self, dir: &Path) -> Result<(), CheckError>;
}

/// Go syntax checker using `gofmt -e`.
pub struct GoChecker;

impl SyntaxChecker for GoChecker {
    fn tool(&self) -> &'static str {
        "gofmt"
    }

    fn check(&self, dir: &Path) -> Result<(), CheckError> {
        let output = Command::new("gofmt")
            .args(["-e", "-l", "."])
            .current_dir(dir)
            .output()
            .map_err(|e| CheckError {
                message: format!("Failed to run gofmt: {}", e),
                output: String::new(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            Err(CheckError {
                message: "gofmt -e failed".to_string(),
                output: format!("stderr:\n{}\n\nstdout:\n{}", stderr, stdout),
            })
        }
    }
}

/// Whether an external tool can be spawned on this machine.
pub fn tool_available(tool: &str) -> bool {
    Command::new(tool)
        .arg("--help")
        .output()
        .map(|_| true)
        .unwrap_or(false)
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {}\n", exp));
                diff.push_str(&format!("  actual:   {}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Generate code into a temporary directory and return it.
///
/// The directory will be cleaned up when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Run a generator and check its output with the given checker.
pub fn assert_generates_valid_code<C>(
    generate: impl FnOnce(&Path) -> Result<()>,
    checker: &C,
) -> Result<()>
where
    C: SyntaxChecker,
{
    let temp_dir = generate_to_temp(generate)?;

    checker.check(temp_dir.path()).map_err(|e| {
        eprintln!("Generated files in {}:", temp_dir.path().display());
        if let Ok(entries) = std::fs::read_dir(temp_dir.path()) {
            for entry in entries.flatten() {
                eprintln!("  {}", entry.path().display());
            }
        }
        eyre!("Syntax check failed: {}", e)
    })?;

    Ok(())
}

/// Minimal Go-flavoured mapper for exercising the shared mapping logic.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubTypeMapper;

impl TypeMapper for StubTypeMapper {
    fn language(&self) -> &'static str {
        "stub"
    }

    fn map_atomic(&self, atomic: &AtomicType) -> Option<&'static str> {
        match atomic {
            AtomicType::Integer => Some("int"),
            AtomicType::Real => Some("float64"),
            AtomicType::Boolean => Some("bool"),
            AtomicType::String | AtomicType::Uuid => Some("string"),
            AtomicType::Unsupported(_) => None,
        }
    }

    fn map_sequence(&self, element: &str) -> String {
        format!("[]{}", element)
    }

    fn map_mapping(&self, key: &str, value: &str) -> String {
        format!("map[{}]{}", key, value)
    }

    fn format_literal(&self, value: &Atom) -> String {
        match value {
            Atom::String(s) => format!("\"{}\"", s),
            other => other.to_string(),
        }
    }

    fn constant_name(&self, naming: &NameNormalizer, alias: &str, value: &Atom) -> String {
        format!("{}{}", alias, naming.normalize(&value.to_string()))
    }
}

fn string_enum(values: &[&str]) -> BaseType {
    BaseType::new(AtomicType::String).with_enum(values.iter().map(|v| Atom::String(v.to_string())))
}

/// A trimmed `Bridge` table: atomic, optional enum, reference set and map columns.
pub fn bridge_table() -> TableSchema {
    TableSchema::new()
        .column("name", ColumnSchema::atomic(AtomicType::String))
        .column(
            "ports",
            ColumnType::set(BaseType::new(AtomicType::Uuid).with_ref("Port", RefType::Strong)),
        )
        .column(
            "fail_mode",
            ColumnType::scalar(string_enum(&["standalone", "secure"]))
                .with_bounds(0, Max::Bounded(1)),
        )
        .column(
            "external_ids",
            ColumnType::map(AtomicType::String, AtomicType::String),
        )
        .column(
            "datapath_id",
            ColumnType::scalar(AtomicType::String).with_bounds(0, Max::Bounded(1)),
        )
        .column("stp_enable", ColumnSchema::atomic(AtomicType::Boolean))
}

/// The `QoS` table with a required enum column.
pub fn qos_table() -> TableSchema {
    TableSchema::new()
        .column(
            "type",
            ColumnType::scalar(string_enum(&["linux-htb", "linux-hfsc"])),
        )
        .column(
            "queues",
            ColumnType::map(
                AtomicType::Integer,
                BaseType::new(AtomicType::Uuid).with_ref("Queue", RefType::Strong),
            ),
        )
        .column(
            "other_config",
            ColumnType::map(AtomicType::String, AtomicType::String),
        )
}

/// The `NAT` table, whose enum and initialism columns stress naming.
pub fn nat_table() -> TableSchema {
    TableSchema::new()
        .column(
            "type",
            ColumnType::scalar(string_enum(&["dnat", "snat", "dnat_and_snat"])),
        )
        .column("external_ip", ColumnSchema::atomic(AtomicType::String))
        .column("logical_ip", ColumnSchema::atomic(AtomicType::String))
        .column(
            "external_mac",
            ColumnType::scalar(AtomicType::String).with_bounds(0, Max::Bounded(1)),
        )
        .column(
            "options",
            ColumnType::map(AtomicType::String, AtomicType::String),
        )
}

/// A table with an integer enum, a real column and a bounded set.
pub fn meter_table() -> TableSchema {
    TableSchema::new()
        .column(
            "level",
            ColumnType::scalar(
                BaseType::new(AtomicType::Integer)
                    .with_enum([Atom::Integer(1), Atom::Integer(2), Atom::Integer(3)]),
            ),
        )
        .column("rate", ColumnSchema::atomic(AtomicType::Real))
        .column(
            "bands",
            ColumnType::set(AtomicType::Integer).with_bounds(1, Max::Bounded(4)),
        )
}

/// A database holding all fixture tables.
pub fn sample_database() -> DatabaseSchema {
    DatabaseSchema {
        name: "Sample".to_string(),
        version: "1.0.0".to_string(),
        cksum: None,
        tables: [
            ("Bridge", bridge_table()),
            ("QoS", qos_table()),
            ("NAT", nat_table()),
            ("Meter", meter_table()),
            ("Port", TableSchema::new().column("name", ColumnSchema::atomic(AtomicType::String))),
            ("Queue", TableSchema::new().column("dscp", ColumnSchema::atomic(AtomicType::Integer))),
        ]
        .into_iter()
        .map(|(name, table)| (name.to_string(), table))
        .collect(),
    }
}
