use crate::policy::{Policy, PolicyId};
use secpol_types::{Issue, Scope};

/// Issues per policy, kept in the order policies were first registered.
#[derive(Clone, Debug, Default)]
pub struct IssuesCollection<'a> {
    entries: Vec<(&'a Policy, Vec<Issue>)>,
}

impl<'a> IssuesCollection<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issues for `policy`. Replacing an existing entry keeps its position.
    pub fn update(&mut self, policy: &'a Policy, issues: Vec<Issue>) {
        match self.entries.iter_mut().find(|(p, _)| *p == policy) {
            Some((_, existing)) => *existing = issues,
            None => self.entries.push((policy, issues)),
        }
    }

    pub fn get(&self, id: &PolicyId) -> Option<&[Issue]> {
        self.entries
            .iter()
            .find(|(p, _)| p.id() == id)
            .map(|(_, issues)| issues.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Policy, &[Issue])> + '_ {
        self.entries
            .iter()
            .map(|(policy, issues)| (*policy, issues.as_slice()))
    }

    pub fn policies(&self) -> impl Iterator<Item = &'a Policy> + '_ {
        self.entries.iter().map(|(policy, _)| *policy)
    }

    /// Number of policies with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_issues(&self) -> usize {
        self.entries.iter().map(|(_, issues)| issues.len()).sum()
    }

    /// Every issue, policy by policy.
    pub fn all_issues(&self) -> Vec<&Issue> {
        self.entries
            .iter()
            .flat_map(|(_, issues)| issues.iter())
            .collect()
    }

    pub fn by_scope(&self, scope: Scope) -> Vec<&Issue> {
        self.all_issues()
            .into_iter()
            .filter(|issue| issue.scope == scope)
            .collect()
    }
}
