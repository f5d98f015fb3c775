use std::collections::HashMap;

use crate::crosswalk::normalize::normalize_name;
use crate::crosswalk::types::AliasEntry;

/// Sport-scoped translation table from provider A's normalized spelling of a
/// name to provider B's. Read-only for the lifetime of a run.
#[derive(Debug, Clone, Default)]
pub struct AliasResolver {
    aliases: HashMap<String, String>,
}

impl AliasResolver {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a resolver from an already loaded `alias -> canonical` map.
    /// Both sides are normalized again so hand-written maps behave the same
    /// as stored ones.
    pub fn new(aliases: HashMap<String, String>) -> Self {
        let aliases = aliases
            .into_iter()
            .map(|(alias, canonical)| (normalize_name(&alias), normalize_name(&canonical)))
            .filter(|(alias, canonical)| !alias.is_empty() && !canonical.is_empty())
            .collect();
        Self { aliases }
    }

    pub fn from_entries(sport: &str, entries: &[AliasEntry]) -> Self {
        let aliases = entries
            .iter()
            .filter(|entry| entry.sport.eq_ignore_ascii_case(sport.trim()))
            .map(|entry| (entry.alias_name.clone(), entry.canonical_name.clone()))
            .collect::<HashMap<String, String>>();
        Self::new(aliases)
    }

    /// Returns the canonical normalized name for `full_name`, or the
    /// normalized input itself when no alias is registered.
    pub fn resolve(&self, full_name: &str) -> String {
        let normalized = normalize_name(full_name);
        match self.aliases.get(&normalized) {
            Some(canonical) => canonical.clone(),
            None => normalized,
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
