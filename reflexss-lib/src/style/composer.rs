//! Folding atomics into a rule.

use crate::command::Command;
use crate::error::{Result, StyleError};
use crate::registry::Registry;
use crate::rule::{RuleArena, RuleId};
use log::trace;

/// Where an atomic lands in the owner's lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    Prepend,
    #[default]
    Append,
}

/// Everything the host can attach to a rule.
///
/// Rules never travel here directly: a nested rule is referred to by the
/// identifier it was given when it was returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Atomic {
    /// Structural index. Negative values count from the end.
    Index(i64),
    /// Selector text, or the identifier of an already registered rule.
    Literal(String),
    /// Explicit reference to a registered rule.
    NestedRef(String),
    Decl(Command),
    /// A branch function such as `hover`, written as ` HOVER`.
    Function(String),
}

impl From<i64> for Atomic {
    fn from(n: i64) -> Self {
        Atomic::Index(n)
    }
}

impl From<f64> for Atomic {
    fn from(n: f64) -> Self {
        Atomic::Index(n.floor() as i64)
    }
}

impl From<&str> for Atomic {
    fn from(text: &str) -> Self {
        Atomic::Literal(text.to_string())
    }
}

impl From<String> for Atomic {
    fn from(text: String) -> Self {
        Atomic::Literal(text)
    }
}

impl From<Command> for Atomic {
    fn from(command: Command) -> Self {
        Atomic::Decl(command)
    }
}

/// The selector fragment for a structural index.
///
/// Negative values select from the end with their magnitude; the rest select
/// from the start as `n - 1`, so `3` gives `:nth-child(2)`. Existing callers
/// rely on this exact mapping.
pub fn index_fragment(n: i64) -> String {
    if n < 0 {
        format!(":nth-last-child({})", n.unsigned_abs())
    } else {
        format!(":nth-child({})", n - 1)
    }
}

/// The selector fragment for a branch function.
pub fn function_fragment(name: &str) -> String {
    format!(" {}", name.to_uppercase())
}

/// Attaches one atomic to `owner`.
pub fn attach(
    arena: &mut RuleArena,
    registry: &Registry,
    owner: RuleId,
    atomic: Atomic,
    position: Position,
) -> Result<()> {
    let prepend = position == Position::Prepend;
    match atomic {
        Atomic::Index(n) => push_fragment(arena, owner, index_fragment(n), prepend),
        Atomic::Literal(text) => match registry.get(&text) {
            Some(existing) => {
                trace!("`{}` refers to rule {}, nesting it in {}", text, existing, owner);
                arena.adopt(owner, existing, prepend)
            }
            None => push_fragment(arena, owner, text, prepend),
        },
        Atomic::NestedRef(identifier) => {
            let existing = registry
                .get(&identifier)
                .ok_or(StyleError::UnknownRule(identifier))?;
            arena.adopt(owner, existing, prepend)
        }
        Atomic::Decl(command) => {
            let rule = arena.open_mut(owner)?;
            if prepend {
                rule.declarations.insert(0, command);
            } else {
                rule.declarations.push(command);
            }
            Ok(())
        }
        Atomic::Function(name) => attach(
            arena,
            registry,
            owner,
            Atomic::Literal(function_fragment(&name)),
            position,
        ),
    }
}

fn push_fragment(arena: &mut RuleArena, owner: RuleId, fragment: String, prepend: bool) -> Result<()> {
    let rule = arena.open_mut(owner)?;
    if prepend {
        rule.selector_fragments.insert(0, fragment);
    } else {
        rule.selector_fragments.push(fragment);
    }
    Ok(())
}
