//! The `explain` use case: look up rule documentation.

use secpol_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the identifier.
    Found(Explanation),
    /// The identifier is neither a known rule id nor a rule name.
    NotFound {
        identifier: String,
        available_rule_ids: &'static [&'static str],
        available_rule_names: &'static [&'static str],
    },
}

/// Look up a rule by id (`SLES-15-040200`) or name (`partition_for_home`).
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier.trim()) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_rule_ids: explain::all_rule_ids(),
            available_rule_names: explain::all_rule_names(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push('\n');

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, rule_ids: &[&str], rule_names: &[&str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown rule id or name: {identifier}\n\n"));
    out.push_str("Available rule ids:\n");
    for id in rule_ids {
        out.push_str(&format!("  - {id}\n"));
    }
    out.push_str("\nAvailable rule names:\n");
    for name in rule_names {
        out.push_str(&format!("  - {name}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use secpol_types::ids;

    #[test]
    fn explain_known_rule_id_and_name() {
        assert!(matches!(
            run_explain(ids::RULE_FIREWALL_ENABLED),
            ExplainOutput::Found(_)
        ));
        assert!(matches!(
            run_explain(ids::NAME_BOOTLOADER_PASSWORD),
            ExplainOutput::Found(_)
        ));
    }

    #[test]
    fn explain_unknown() {
        match run_explain("package_aide_installed") {
            ExplainOutput::NotFound {
                identifier,
                available_rule_ids,
                available_rule_names,
            } => {
                assert_eq!(identifier, "package_aide_installed");
                assert!(available_rule_ids.contains(&ids::RULE_NO_WIRELESS));
                assert!(available_rule_names.contains(&ids::NAME_NO_WIRELESS));
            }
            ExplainOutput::Found(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn format_explanation_output() {
        let ExplainOutput::Found(exp) = run_explain(ids::RULE_NO_WIRELESS) else {
            panic!("expected Found");
        };
        let formatted = format_explanation(&exp);
        assert!(formatted.starts_with(exp.title));
        assert!(formatted.contains("Remediation\n-----------\n"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("missing", &["R-1", "R-2"], &["rule_one"]);
        assert!(formatted.contains("Unknown rule id or name: missing"));
        assert!(formatted.contains("  - R-2\n"));
        assert!(formatted.contains("Available rule names:\n  - rule_one\n"));
    }
}
