//! Identity and deduplication.
//!
//! A rule's identifier is derived from its structure alone, so two rules built
//! independently with the same fragments, declarations and children collapse
//! into a single registry entry. The identifier doubles as a CSS class name.
//!
//! [`RuleHashes`] is a separate filter over serialized text, used by the
//! streaming sink so the same line is never inserted twice.

use crate::error::Result;
use crate::rule::{RuleArena, RuleId};
use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;
use xxhash_rust::xxh3::xxh3_64;

/// Identifiers start with a letter so they are always valid class names.
const IDENTIFIER_PREFIX: char = 'r';

/// Returns the rule's identifier, computing it if the rule is not registered yet.
pub fn identifier_of(arena: &RuleArena, id: RuleId) -> Result<String> {
    let rule = arena.get(id)?;
    if let Some(identifier) = &rule.identifier {
        return Ok(identifier.clone());
    }

    let mut content = String::new();
    for fragment in &rule.selector_fragments {
        content.push_str("f:");
        content.push_str(fragment);
        content.push('\0');
    }
    for decl in &rule.declarations {
        content.push_str("d:");
        content.push_str(&decl.to_declaration());
        content.push('\0');
    }
    for &child in &rule.children {
        content.push_str("c:");
        content.push_str(&identifier_of(arena, child)?);
        content.push('\0');
    }

    let mut identifier = String::with_capacity(14);
    identifier.push(IDENTIFIER_PREFIX);
    identifier.push_str(&to_base36(xxh3_64(content.as_bytes())));
    Ok(identifier)
}

/// Content hash of one serialized line.
pub fn hash_text(text: &str) -> u64 {
    xxh3_64(text.as_bytes())
}

pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::with_capacity(13);
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}

/// Insertion-ordered map from identifier to rule. Entries are never removed.
#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, RuleId>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            entries: IndexMap::new(),
        }
    }

    /// Registers a finished rule and returns its identifier.
    ///
    /// When a structurally identical rule is already registered, that entry
    /// wins and `id` is left out of the registry. Either way `id` is sealed.
    pub fn register(&mut self, arena: &mut RuleArena, id: RuleId) -> Result<String> {
        let identifier = identifier_of(arena, id)?;
        arena.get_mut(id)?.identifier = Some(identifier.clone());

        match self.entries.get(&identifier) {
            Some(&existing) if existing != id => {
                debug!("rule {} duplicates {} as `{}`", id, existing, identifier);
            }
            Some(_) => {}
            None => {
                debug!("registered rule {} as `{}`", id, identifier);
                self.entries.insert(identifier.clone(), id);
            }
        }
        Ok(identifier)
    }

    pub fn get(&self, identifier: &str) -> Option<RuleId> {
        self.entries.get(identifier).copied()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Registered rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RuleId)> + '_ {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hashes of every line already pushed into a sink.
#[derive(Debug, Default)]
pub struct RuleHashes {
    seen: HashSet<u64>,
}

impl RuleHashes {
    pub fn new() -> Self {
        RuleHashes {
            seen: HashSet::new(),
        }
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.seen.contains(&hash)
    }

    /// Call only after the line was actually accepted by the sink.
    pub fn record(&mut self, hash: u64) {
        self.seen.insert(hash);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::value::px;

    fn build(arena: &mut RuleArena, fragment: &str, width: f64) -> RuleId {
        let id = arena.alloc();
        let rule = arena.get_mut(id).unwrap();
        rule.selector_fragments.push(fragment.to_string());
        rule.declarations.push(Command::new("width", [px(width).into()]));
        id
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn test_identifier_is_structural() {
        let mut arena = RuleArena::new();
        let a = build(&mut arena, "box", 10.0);
        let b = build(&mut arena, "box", 10.0);
        let c = build(&mut arena, "box", 11.0);

        let id_a = identifier_of(&arena, a).unwrap();
        assert_eq!(id_a, identifier_of(&arena, b).unwrap());
        assert_ne!(id_a, identifier_of(&arena, c).unwrap());
        assert!(id_a.starts_with('r'));
    }

    #[test]
    fn test_identifier_depends_on_children() {
        let mut arena = RuleArena::new();
        let child = build(&mut arena, "inner", 1.0);
        let with_child = build(&mut arena, "box", 10.0);
        let without = build(&mut arena, "box", 10.0);
        arena.adopt(with_child, child, false).unwrap();

        assert_ne!(
            identifier_of(&arena, with_child).unwrap(),
            identifier_of(&arena, without).unwrap()
        );
    }

    #[test]
    fn test_first_registration_wins() {
        let mut arena = RuleArena::new();
        let mut registry = Registry::new();
        let first = build(&mut arena, "box", 10.0);
        let second = build(&mut arena, "box", 10.0);

        let ident = registry.register(&mut arena, first).unwrap();
        assert_eq!(registry.register(&mut arena, second).unwrap(), ident);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&ident), Some(first));
        assert!(arena.get(second).unwrap().is_sealed());
    }

    #[test]
    fn test_registry_keeps_insertion_order() {
        let mut arena = RuleArena::new();
        let mut registry = Registry::new();
        let ids: Vec<_> = (0..5).map(|i| build(&mut arena, "item", i as f64)).collect();
        for &id in ids.iter().rev() {
            registry.register(&mut arena, id).unwrap();
        }
        let order: Vec<_> = registry.iter().map(|(_, id)| id).collect();
        assert_eq!(order, ids.into_iter().rev().collect::<Vec<_>>());
    }
}
