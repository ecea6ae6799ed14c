//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(secpol_types::SecpolReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(secpol_settings::SecpolConfigV1)
}

fn generate_target_schema() -> schemars::Schema {
    schema_for!(secpol_domain::TargetConfig)
}

const REPORT_SCHEMA: &str = "secpol.report.v1.json";
const CONFIG_SCHEMA: &str = "secpol.config.v1.json";
const TARGET_SCHEMA: &str = "secpol.target.v1.json";

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: REPORT_SCHEMA,
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: CONFIG_SCHEMA,
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: TARGET_SCHEMA,
            generate: generate_target_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that the schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for name in &missing {
        eprintln!("Missing schema: {name}");
    }
    for name in &mismatched {
        eprintln!("Schema out of date: {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn compile(spec_filename: &str) -> anyhow::Result<jsonschema::Validator> {
    let spec = schema_specs()
        .into_iter()
        .find(|s| s.filename == spec_filename)
        .with_context(|| format!("no schema named {spec_filename}"))?;
    let value = serde_json::to_value((spec.generate)()).context("Failed to serialize schema")?;
    jsonschema::validator_for(&value)
        .map_err(|e| anyhow::anyhow!("Failed to compile {spec_filename}: {e}"))
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))
}

/// Validate every CLI fixture against the generated schemas.
///
/// - `target.json` must match the target snapshot schema
/// - `expected.report.json` must match the report schema and already carry the
///   normalization placeholders
/// - `secpol.toml` must parse and resolve
fn conform() -> anyhow::Result<()> {
    let report = compile(REPORT_SCHEMA)?;
    let target = compile(TARGET_SCHEMA)?;
    let config = compile(CONFIG_SCHEMA)?;

    let dir = fixtures_dir();
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    entries.sort();

    let mut errors = Vec::new();
    for fixture in &entries {
        let name = fixture
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let target_value = read_json(&fixture.join("target.json"))?;
        for err in target.iter_errors(&target_value) {
            errors.push(format!("{name}/target.json: {err}"));
        }

        let report_value = read_json(&fixture.join("expected.report.json"))?;
        for err in report.iter_errors(&report_value) {
            errors.push(format!("{name}/expected.report.json: {err}"));
        }
        if secpol_test_util::normalize_report(report_value.clone()) != report_value {
            errors.push(format!(
                "{name}/expected.report.json: timestamps and tool version must be placeholders"
            ));
        }

        let config_path = fixture.join("secpol.toml");
        let text = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        match secpol_settings::parse_config_toml(&text) {
            Ok(cfg) => {
                let value = serde_json::to_value(&cfg).context("Failed to serialize config")?;
                for err in config.iter_errors(&value) {
                    errors.push(format!("{name}/secpol.toml: {err}"));
                }
                if let Err(err) =
                    secpol_settings::resolve_config(cfg, secpol_settings::Overrides::default())
                {
                    errors.push(format!("{name}/secpol.toml: {err:#}"));
                }
            }
            Err(err) => errors.push(format!("{name}/secpol.toml: {err:#}")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} fixtures conform", entries.len());
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("Conformance failed with {} errors", errors.len())
}

/// Validate that every rule id and rule name has an explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let rule_ids = secpol_types::explain::all_rule_ids();
    let rule_names = secpol_types::explain::all_rule_names();

    let mut errors = Vec::new();
    for identifier in rule_ids.iter().chain(rule_names) {
        match secpol_types::explain::lookup_explanation(identifier) {
            Some(exp) => {
                for (field, text) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                ] {
                    if text.is_empty() {
                        errors.push(format!("'{identifier}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("'{identifier}' has no explanation")),
        }
    }

    // Every rule shipped in a policy must be explainable.
    for policy in secpol_domain::catalog::known_policies() {
        for rule in policy.rules() {
            if !rule_ids.iter().any(|id| *id == rule.id()) {
                errors.push(format!(
                    "rule {} of policy {} is not in the explain registry",
                    rule.id(),
                    policy.id()
                ));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} rule ids have explanations", rule_ids.len());
        println!("✓ {} rule names have explanations", rule_names.len());
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!(
        "Explain coverage validation failed with {} errors",
        errors.len()
    )
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate CLI fixtures against the generated schemas");
    eprintln!("  explain-coverage  Validate all rule ids and names have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
