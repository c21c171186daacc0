use crate::command::Command;
use crate::error::{Result, StyleError};
use std::fmt;

/// Handle to a [`Rule`] stored in a [`RuleArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u32);

impl RuleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One eventual CSS selector block.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    /// Raw selector pieces (class tokens, combinators, pseudo selectors),
    /// in attachment order.
    pub(crate) selector_fragments: Vec<String>,
    pub(crate) declarations: Vec<Command>,
    /// Rules emitted after this one, as separate blocks.
    pub(crate) children: Vec<RuleId>,
    /// Rules that include this one as a child. Non-empty means the rule is
    /// not emitted at the top level.
    pub(crate) containers: Vec<RuleId>,
    /// Set when the rule is registered; never changes afterwards.
    pub(crate) identifier: Option<String>,
}

impl Rule {
    pub fn selector_fragments(&self) -> &[String] {
        &self.selector_fragments
    }

    pub fn declarations(&self) -> &[Command] {
        &self.declarations
    }

    pub fn children(&self) -> &[RuleId] {
        &self.children
    }

    pub fn containers(&self) -> &[RuleId] {
        &self.containers
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn is_top_level(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.identifier.is_some()
    }
}

/// Owns every rule created by a library. Rules reference each other through
/// [`RuleId`] handles, so the parent/child graph never forms ownership cycles.
/// Rules are never freed.
#[derive(Debug, Default)]
pub struct RuleArena {
    rules: Vec<Rule>,
}

impl RuleArena {
    pub fn new() -> Self {
        RuleArena { rules: Vec::new() }
    }

    pub fn alloc(&mut self) -> RuleId {
        let id = RuleId(self.rules.len() as u32);
        self.rules.push(Rule::default());
        id
    }

    pub fn get(&self, id: RuleId) -> Result<&Rule> {
        self.rules.get(id.index()).ok_or(StyleError::InvalidRule(id))
    }

    pub fn get_mut(&mut self, id: RuleId) -> Result<&mut Rule> {
        self.rules
            .get_mut(id.index())
            .ok_or(StyleError::InvalidRule(id))
    }

    /// Like [`get_mut`](Self::get_mut), but refuses registered rules.
    pub fn open_mut(&mut self, id: RuleId) -> Result<&mut Rule> {
        let rule = self.get_mut(id)?;
        if rule.is_sealed() {
            return Err(StyleError::Sealed(id));
        }
        Ok(rule)
    }

    /// Makes `child` a child of `parent` and `parent` a container of `child`.
    ///
    /// Both edges are written here and nowhere else. `prepend` only affects
    /// where the child lands in the parent's list; the back edge is always
    /// appended.
    pub fn adopt(&mut self, parent: RuleId, child: RuleId, prepend: bool) -> Result<()> {
        self.get(child)?;
        let parent_rule = self.open_mut(parent)?;
        if prepend {
            parent_rule.children.insert(0, child);
        } else {
            parent_rule.children.push(child);
        }
        self.get_mut(child)?.containers.push(parent);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
