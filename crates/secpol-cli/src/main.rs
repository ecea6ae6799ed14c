//! CLI entry point for secpol.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and
//! exit codes. All business logic lives in the `secpol-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use secpol_app::{
    CheckInput, ExplainOutput, format_explanation, format_lsm, format_not_found, format_policies,
    parse_report_json, render_markdown, render_text, run_check, run_explain, run_fix,
    run_policies, serialize_report, serialize_target, verdict_exit_code,
};
use secpol_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "secpol",
    version,
    about = "Security policy compliance checks for installed systems"
)]
struct Cli {
    /// Path to secpol config TOML. A missing file means defaults.
    #[arg(long, default_value = "secpol.toml")]
    config: Utf8PathBuf,

    /// Only evaluate rules of this scope (storage|network|firewall|bootloader|all).
    #[arg(long)]
    scope: Option<String>,

    /// Evaluate rules that are marked as disabled too.
    #[arg(long)]
    include_disabled: bool,

    /// Enable a policy by id, on top of config and environment (repeatable).
    #[arg(long = "policy", value_name = "ID")]
    policies: Vec<String>,

    /// Disable a rule by name (repeatable).
    #[arg(long = "disable-rule", value_name = "NAME")]
    disabled_rules: Vec<String>,

    /// Override when issues fail the run (any|none).
    #[arg(long)]
    fail_on: Option<String>,

    /// ssg-apply file with a profile and disabled rules. Skipped when missing.
    #[arg(long)]
    ssg_apply: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the enabled policies against a target snapshot and write a report.
    Check {
        /// Target snapshot JSON.
        #[arg(long)]
        target: Utf8PathBuf,

        #[command(flatten)]
        out: ReportArgs,
    },

    /// Remediate failing rules, write the fixed snapshot, then report what is left.
    Fix {
        /// Target snapshot JSON.
        #[arg(long)]
        target: Utf8PathBuf,

        /// Where to write the fixed snapshot (defaults to `--target`).
        #[arg(long)]
        target_out: Option<Utf8PathBuf>,

        #[command(flatten)]
        out: ReportArgs,
    },

    /// List known policies with their state and rules, then the security module settings.
    Policies,

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/secpol/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a rule id or rule name with remediation guidance.
    Explain {
        /// The rule id (e.g. "SLES-15-040200") or name (e.g. "partition_for_home").
        identifier: String,
    },
}

#[derive(clap::Args, Debug)]
struct ReportArgs {
    /// Where to write the JSON report.
    #[arg(long, default_value = "artifacts/secpol/report.json")]
    report_out: Utf8PathBuf,

    /// Write a Markdown report alongside the JSON.
    #[arg(long)]
    write_markdown: bool,

    /// Where to write the Markdown report (if enabled).
    #[arg(long, default_value = "artifacts/secpol/comment.md")]
    markdown_out: Utf8PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match &cli.cmd {
        Commands::Check { target, out } => cmd_check(&cli, target, None, out, false),
        Commands::Fix {
            target,
            target_out,
            out,
        } => {
            let target_out = target_out.as_deref().unwrap_or(target.as_path());
            cmd_check(&cli, target, Some(target_out), out, true)
        }
        Commands::Policies => cmd_policies(&cli).map(|()| 0),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()).map(|()| 0),
        Commands::Explain { identifier } => cmd_explain(identifier),
    };

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("secpol error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Inputs shared by every command that builds a manager.
struct Loaded {
    config_text: String,
    ssg_apply_text: Option<String>,
    vars: Vec<(String, String)>,
    overrides: Overrides,
}

impl Loaded {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        // Missing config is allowed (defaults apply).
        let config_text = std::fs::read_to_string(&cli.config).unwrap_or_default();

        let ssg_apply_text = match &cli.ssg_apply {
            Some(path) if path.exists() => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("read ssg-apply file: {path}"))?,
            ),
            Some(path) => {
                log::debug!("no ssg-apply file at {path}");
                None
            }
            None => None,
        };

        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        let overrides = Overrides {
            policies: cli.policies.clone(),
            scope: cli.scope.clone(),
            include_disabled: cli.include_disabled.then_some(true),
            fail_on: cli.fail_on.clone(),
            disabled_rules: cli.disabled_rules.clone(),
        };

        Ok(Self {
            config_text,
            ssg_apply_text,
            vars,
            overrides,
        })
    }

    fn input<'a>(&'a self, target_json: &'a str) -> CheckInput<'a> {
        CheckInput {
            target_json,
            config_text: &self.config_text,
            ssg_apply_text: self.ssg_apply_text.as_deref(),
            vars: self.vars.clone(),
            overrides: self.overrides.clone(),
        }
    }
}

fn cmd_check(
    cli: &Cli,
    target: &Utf8Path,
    target_out: Option<&Utf8Path>,
    out: &ReportArgs,
    fix: bool,
) -> anyhow::Result<i32> {
    let loaded = Loaded::from_cli(cli)?;
    let target_json = std::fs::read_to_string(target)
        .with_context(|| format!("read target snapshot: {target}"))?;

    let input = loaded.input(&target_json);
    let output = if fix {
        run_fix(input)?
    } else {
        run_check(input)?
    };

    if let Some(path) = target_out {
        let bytes = serialize_target(&output.target)?;
        write_bytes(path, &bytes).context("write target snapshot")?;
        log::info!("wrote fixed target snapshot to {path}");
    }

    let data = serialize_report(&output.report)?;
    write_bytes(&out.report_out, &data).context("write report json")?;

    if out.write_markdown {
        let md = render_markdown(&output.report);
        write_bytes(&out.markdown_out, md.as_bytes()).context("write markdown")?;
    }

    print!("{}", render_text(&output.report));

    Ok(verdict_exit_code(output.report.verdict))
}

fn cmd_policies(cli: &Cli) -> anyhow::Result<()> {
    let loaded = Loaded::from_cli(cli)?;
    let output = run_policies(loaded.input(""))?;
    print!("{}", format_policies(&output.policies));
    print!("{}", format_lsm(&output.lsm));
    Ok(())
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data).with_context(|| format!("write file: {path}"))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_bytes(out_path, md.as_bytes()).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<i32> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(0)
        }
        ExplainOutput::NotFound {
            identifier,
            available_rule_ids,
            available_rule_names,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_rule_ids, available_rule_names)
            );
            Ok(1)
        }
    }
}
