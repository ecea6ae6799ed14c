//! The policy registry and the entry point for evaluation and remediation.

use crate::catalog;
use crate::issues::IssuesCollection;
use crate::policy::{Policy, PolicyId};
use crate::rules::{Check, Rule};
use crate::target::TargetConfig;
use secpol_types::ids::ENV_SECURITY_POLICIES;
use secpol_types::{FixOutcome, Scope};
use std::collections::{BTreeMap, BTreeSet};

/// Failing rules per enabled policy, in registry order.
///
/// Policies without failing rules have no entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FailingRules<'a> {
    entries: Vec<(&'a Policy, Vec<&'a Rule>)>,
}

impl<'a> FailingRules<'a> {
    pub fn get(&self, policy: &Policy) -> Option<&[&'a Rule]> {
        self.entries
            .iter()
            .find(|(p, _)| *p == policy)
            .map(|(_, rules)| rules.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Policy, &[&'a Rule])> + '_ {
        self.entries
            .iter()
            .map(|(policy, rules)| (*policy, rules.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One remediation attempt made by [`Manager::remediate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remediation {
    pub policy_id: PolicyId,
    pub rule_id: String,
    pub scope: Scope,
    pub outcome: FixOutcome,
}

/// Registry of known policies plus the set currently enabled.
///
/// The registry is fixed at construction. Enabling or disabling takes `&mut self`, so a
/// host sharing one manager across threads has to serialise those calls itself.
#[derive(Clone, Debug)]
pub struct Manager {
    policies: Vec<Policy>,
    enabled: BTreeSet<PolicyId>,
}

impl Default for Manager {
    /// The built-in catalog with nothing enabled.
    fn default() -> Self {
        Self::new(catalog::known_policies())
    }
}

impl Manager {
    /// A manager over `policies` with nothing enabled.
    pub fn new(policies: Vec<Policy>) -> Self {
        Self {
            policies,
            enabled: BTreeSet::new(),
        }
    }

    /// The built-in catalog, enabled from the process environment.
    pub fn from_env() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_vars(vars)
    }

    /// The built-in catalog, enabled from an explicit variable set.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_vars(catalog::known_policies(), vars)
    }

    /// `policies` as registry, enabled from an explicit variable set.
    pub fn with_vars<I, K, V>(policies: Vec<Policy>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut manager = Self::new(policies);
        let tokens = activation_tokens(vars);
        for token in &tokens {
            match manager.policies.iter().find(|p| p.id().matches(token)) {
                Some(policy) => {
                    manager.enabled.insert(policy.id().clone());
                }
                None => log::debug!("{ENV_SECURITY_POLICIES}: ignoring unknown policy '{token}'"),
            }
        }
        manager
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn find_policy(&self, id: &str) -> Option<&Policy> {
        self.policies.iter().find(|p| p.id().as_str() == id)
    }

    /// No-op when `policy` is not in the registry.
    pub fn enable_policy(&mut self, policy: &Policy) {
        if self.policies.contains(policy) {
            self.enabled.insert(policy.id().clone());
        }
    }

    pub fn disable_policy(&mut self, policy: &Policy) {
        self.enabled.remove(policy.id());
    }

    pub fn enabled_policy(&self, policy: &Policy) -> bool {
        self.enabled.contains(policy.id())
    }

    /// Enabled policies in registry order.
    pub fn enabled_policies(&self) -> Vec<&Policy> {
        self.policies
            .iter()
            .filter(|p| self.enabled.contains(p.id()))
            .collect()
    }

    /// Marks the named rules disabled in every registered policy.
    ///
    /// Returns the names no policy knew; they are kept as placeholders.
    pub fn apply_disabled_rules<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let mut unknown: Option<BTreeSet<String>> = None;
        for policy in &mut self.policies {
            let missing: BTreeSet<String> =
                policy.apply_disabled_rules(names).into_iter().collect();
            unknown = Some(match unknown {
                Some(acc) => acc.intersection(&missing).cloned().collect(),
                None => missing,
            });
        }

        let unknown: Vec<String> = unknown.unwrap_or_default().into_iter().collect();
        for name in &unknown {
            log::warn!("disabled rule '{name}' is not implemented; keeping it as a placeholder");
        }
        unknown
    }

    /// Failing rules of every enabled policy. Empty when nothing is enabled.
    pub fn failing_rules(
        &self,
        target: &TargetConfig,
        scope: Option<Scope>,
        include_disabled: bool,
    ) -> FailingRules<'_> {
        let entries = self
            .enabled_policies()
            .into_iter()
            .map(|policy| (policy, policy.failing_rules(target, scope, include_disabled)))
            .filter(|(_, rules)| !rules.is_empty())
            .collect();
        FailingRules { entries }
    }

    /// Issues of every enabled policy; a policy without issues gets an empty entry.
    pub fn issues(
        &self,
        target: &TargetConfig,
        scope: Option<Scope>,
        include_disabled: bool,
    ) -> IssuesCollection<'_> {
        let mut collection = IssuesCollection::new();
        for policy in self.enabled_policies() {
            collection.update(policy, policy.issues(target, scope, include_disabled));
        }
        collection
    }

    /// Number of rules an evaluation with these filters looks at. Placeholders recorded for
    /// unknown disabled names have no check and are not counted.
    pub fn evaluated_rule_count(&self, scope: Option<Scope>, include_disabled: bool) -> usize {
        self.enabled_policies()
            .into_iter()
            .map(|p| {
                p.evaluated_rules(scope, include_disabled)
                    .filter(|rule| rule.check() != &Check::Unknown)
                    .count()
            })
            .sum()
    }

    /// Applies the fix of every failing rule, policy by policy.
    ///
    /// Rules shared by several policies are fixed once; later attempts report
    /// [`FixOutcome::NothingToFix`]. There is no rollback: each fix is safe to re-apply.
    pub fn remediate(
        &self,
        target: &mut TargetConfig,
        scope: Option<Scope>,
        include_disabled: bool,
    ) -> Vec<Remediation> {
        let failing = self.failing_rules(target, scope, include_disabled);

        let mut out = Vec::new();
        for (policy, rules) in failing.iter() {
            for rule in rules {
                out.push(Remediation {
                    policy_id: policy.id().clone(),
                    rule_id: rule.id().to_string(),
                    scope: rule.scope(),
                    outcome: rule.fix(target),
                });
            }
        }
        out
    }
}

/// Comma-separated tokens of the activation variable.
///
/// Names are compared case-insensitively. Sorting first makes the choice deterministic
/// and prefers the all-uppercase spelling, which sorts before any lowercase variant.
fn activation_tokens<I, K, V>(vars: I) -> Vec<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: BTreeMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let Some(value) = vars
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(ENV_SECURITY_POLICIES))
        .map(|(_, v)| v)
    else {
        return Vec::new();
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
