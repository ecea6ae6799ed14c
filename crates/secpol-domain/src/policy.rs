use crate::rules::Rule;
use crate::target::TargetConfig;
use secpol_types::{Issue, Scope};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Policy identifier, e.g. `disa_stig`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PolicyId(String);

impl PolicyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison, as used for the activation variable.
    pub fn matches(&self, token: &str) -> bool {
        self.0.eq_ignore_ascii_case(token.trim())
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PolicyId {
    fn from(value: &str) -> Self {
        PolicyId::new(value)
    }
}

/// A named, ordered bundle of rules.
///
/// Two policies are equal when their ids are equal, whatever rules they carry, so a
/// policy built on the side can stand in for the registry's instance as a map key.
#[derive(Clone, Debug)]
pub struct Policy {
    id: PolicyId,
    name: String,
    packages: Vec<String>,
    rules: Vec<Rule>,
}

impl PartialEq for Policy {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Policy {}

impl Hash for Policy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Policy {
    pub fn new(id: impl Into<PolicyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            packages: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn id(&self) -> &PolicyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Packages the target needs installed for this policy.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Finds a rule by id or by name.
    pub fn rule(&self, identifier: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.matches(identifier))
    }

    /// Rules that take part in an evaluation with the given filters, in declaration order.
    pub fn evaluated_rules(
        &self,
        scope: Option<Scope>,
        include_disabled: bool,
    ) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(move |rule| scope.is_none_or(|s| rule.scope() == s))
            .filter(move |rule| include_disabled || !rule.disabled())
    }

    /// Rules that fail on `target`, in declaration order.
    pub fn failing_rules(
        &self,
        target: &TargetConfig,
        scope: Option<Scope>,
        include_disabled: bool,
    ) -> Vec<&Rule> {
        self.evaluated_rules(scope, include_disabled)
            .filter(|rule| !rule.pass(target))
            .collect()
    }

    /// Same selection as [`Policy::failing_rules`], as issues.
    pub fn issues(
        &self,
        target: &TargetConfig,
        scope: Option<Scope>,
        include_disabled: bool,
    ) -> Vec<Issue> {
        self.evaluated_rules(scope, include_disabled)
            .filter_map(|rule| rule.validate(target))
            .collect()
    }

    /// Flags the rules named in `names` as disabled.
    ///
    /// Names no rule answers to become disabled [`Rule::unknown`] placeholders, so the
    /// policy remembers them without ever failing on them. Returns those names.
    pub fn apply_disabled_rules<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let mut unknown = Vec::new();

        for name in names.iter().map(AsRef::as_ref) {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            match self.rules.iter_mut().find(|r| r.matches(name)) {
                Some(rule) => rule.set_disabled(true),
                None => {
                    self.rules.push(Rule::unknown(name).with_disabled(true));
                    unknown.push(name.to_string());
                }
            }
        }

        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{devicegraph, network, scenario_policy, wireless_conn};

    fn failing_target() -> TargetConfig {
        TargetConfig {
            storage: Some(devicegraph(&["/"])),
            network: Some(network(vec![wireless_conn("wlan0", None)])),
            ..TargetConfig::default()
        }
    }

    fn ids(rules: &[&Rule]) -> Vec<String> {
        rules.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn disabled_rules_only_show_up_when_included() {
        let policy = scenario_policy();
        let target = failing_target();

        assert_eq!(ids(&policy.failing_rules(&target, None, false)), ["R1"]);
        assert_eq!(
            ids(&policy.failing_rules(&target, None, true)),
            ["R1", "R2"]
        );
        assert_eq!(
            ids(&policy.failing_rules(&target, Some(Scope::Network), true)),
            ["R2"]
        );
        assert!(
            policy
                .failing_rules(&target, Some(Scope::Network), false)
                .is_empty()
        );
    }

    #[test]
    fn disabling_never_removes_a_rule() {
        let mut policy = scenario_policy();
        let before = policy.rules().len();
        policy.apply_disabled_rules(&["R1"]);
        assert_eq!(policy.rules().len(), before);
        assert!(policy.rule("R1").is_some_and(|r| r.disabled()));
    }

    #[test]
    fn unknown_disabled_names_become_placeholders() {
        let mut policy = scenario_policy();
        let unknown = policy.apply_disabled_rules(&["home_rule", "package_aide_installed", " "]);

        assert_eq!(unknown, ["package_aide_installed"]);
        let placeholder = policy.rule("package_aide_installed").expect("placeholder");
        assert!(placeholder.disabled());
        assert!(!placeholder.fixable());

        // Placeholders never fail, even when disabled rules are included.
        let failing = policy.failing_rules(&failing_target(), None, true);
        assert_eq!(ids(&failing), ["R1", "R2"]);
    }

    #[test]
    fn issues_follow_the_same_filters() {
        let policy = scenario_policy();
        let issues = policy.issues(&failing_target(), None, true);
        let rule_ids: Vec<&str> = issues.iter().map(|i| i.rule_id.as_str()).collect();
        assert_eq!(rule_ids, ["R1", "R2"]);
        assert_eq!(issues[0].scope, Scope::Storage);
        assert_eq!(issues[1].scope, Scope::Network);
    }

    #[test]
    fn equality_ignores_rules() {
        let registry = scenario_policy();
        let lookalike = Policy::new("scenario", "Another name");
        assert_eq!(registry, lookalike);
        assert_ne!(registry, Policy::new("other", "Scenario"));
    }

    #[test]
    fn policy_id_matches_case_insensitively() {
        let id = PolicyId::new("disa_stig");
        assert!(id.matches("Disa_Stig"));
        assert!(id.matches(" DISA_STIG "));
        assert!(!id.matches("DisaStig"));
    }
}
