//! The library facade: one context object holding every rule, the registry
//! and the streaming channel.

use crate::command::Command;
use crate::error::{Result, StyleError};
use crate::registry::{self, Registry};
use crate::rule::{Rule, RuleArena, RuleId};
use crate::stream::{NullSink, StreamChannel, StyleSink};
use crate::style::composer::{self, Atomic, Position};
use crate::style::minify::minify;
use crate::style::serializer::{self, EmitOptions};
use crate::value::CssValue;
use log::debug;

/// The contract a tree-building host drives while it assembles containers.
pub trait ContainerLibrary {
    type Branch: Copy;
    type Atomic;
    /// What the host gets back in place of a finished container.
    type Token;

    fn create_container(&mut self) -> Self::Branch;

    fn attach_atomic(
        &mut self,
        atomic: Self::Atomic,
        owner: Self::Branch,
        position: Position,
    ) -> Result<()>;

    fn detach_atomic(&mut self, atomic: Self::Atomic, owner: Self::Branch) -> Result<()>;

    fn swap_branches(&mut self, a: Self::Branch, b: Self::Branch) -> Result<()>;

    fn replace_branch(&mut self, existing: Self::Branch, replacement: Self::Branch) -> Result<()>;

    fn attach_attribute(&mut self, branch: Self::Branch, key: &str, value: &str) -> Result<()>;

    fn detach_attribute(&mut self, branch: Self::Branch, key: &str) -> Result<()>;

    /// Called when a branch function (e.g. `hover(...)`) wraps a container.
    fn handle_branch_function(&mut self, branch: Self::Branch, name: &str) -> Result<()>;

    /// Called when the host is done building `branch`.
    fn return_branch(&mut self, branch: Self::Branch) -> Result<Self::Token>;

    fn is_branch_disposed(&self, branch: Self::Branch) -> bool;
}

/// One entry of a rule's content, as seen by a tree walker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Child<'a> {
    Declaration(&'a Command),
    Rule(RuleId),
}

/// Builds, deduplicates, emits and streams style rules.
pub struct Library {
    arena: RuleArena,
    registry: Registry,
    stream: StreamChannel,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// A library with no live style sheet; [`stream`](Self::stream) is a no-op.
    pub fn new() -> Self {
        Library {
            arena: RuleArena::new(),
            registry: Registry::new(),
            stream: StreamChannel::new(Box::new(NullSink)),
        }
    }

    /// A library that streams into `sink`. Streaming starts enabled.
    pub fn with_sink(sink: impl StyleSink + 'static) -> Result<Self> {
        let mut library = Library {
            arena: RuleArena::new(),
            registry: Registry::new(),
            stream: StreamChannel::new(Box::new(sink)),
        };
        library.stream(true)?;
        Ok(library)
    }

    /// Shorthand for [`ContainerLibrary::attach_atomic`] at the end.
    pub fn attach(&mut self, owner: RuleId, atomic: impl Into<Atomic>) -> Result<()> {
        composer::attach(
            &mut self.arena,
            &self.registry,
            owner,
            atomic.into(),
            Position::Append,
        )
    }

    /// Serializes every top-level rule into one CSS document.
    ///
    /// Rules that are only referenced as someone's child appear right after
    /// their container instead. Blocks are separated by two `options.line`.
    pub fn emit(&self, options: &EmitOptions) -> Result<String> {
        let mut blocks = Vec::new();
        for (_, id) in self.registry.iter() {
            if self.arena.get(id)?.is_top_level() {
                blocks.extend(serializer::to_string_array(&self.arena, id, options)?);
            }
        }
        let separator = options.line.repeat(2);
        let css = blocks.join(&separator);
        if options.minify {
            minify(&css)
        } else {
            Ok(css)
        }
    }

    /// Toggles streaming of newly returned rules into the sink.
    ///
    /// Rules returned while streaming was off are not back-filled.
    pub fn stream(&mut self, enable: bool) -> Result<()> {
        self.stream.set_enabled(enable)
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.is_enabled()
    }

    /// Pushes the rule's lines into the sink, skipping lines already there.
    /// Returns how many lines were appended.
    pub fn publish(&mut self, id: RuleId) -> Result<usize> {
        if !self.stream.is_enabled() {
            return Ok(0);
        }
        let lines = serializer::to_string_array(&self.arena, id, &EmitOptions::default())?;
        self.stream.publish(lines)
    }

    pub fn to_string_array(&self, id: RuleId, options: &EmitOptions) -> Result<Vec<String>> {
        serializer::to_string_array(&self.arena, id, options)
    }

    /// Builds a declaration for any property by its camelCase name.
    pub fn command(name: &str, values: impl IntoIterator<Item = CssValue>) -> Command {
        Command::new(name, values)
    }

    pub fn rule(&self, id: RuleId) -> Result<&Rule> {
        self.arena.get(id)
    }

    pub fn lookup(&self, identifier: &str) -> Option<RuleId> {
        self.registry.get(identifier)
    }

    pub fn identifier(&self, id: RuleId) -> Result<String> {
        registry::identifier_of(&self.arena, id)
    }

    /// Declarations first, then nested rules.
    pub fn children(&self, id: RuleId) -> Result<Vec<Child<'_>>> {
        let rule = self.arena.get(id)?;
        Ok(rule
            .declarations
            .iter()
            .map(Child::Declaration)
            .chain(rule.children.iter().copied().map(Child::Rule))
            .collect())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl ContainerLibrary for Library {
    type Branch = RuleId;
    type Atomic = Atomic;
    type Token = String;

    fn create_container(&mut self) -> RuleId {
        self.arena.alloc()
    }

    fn attach_atomic(&mut self, atomic: Atomic, owner: RuleId, position: Position) -> Result<()> {
        composer::attach(&mut self.arena, &self.registry, owner, atomic, position)
    }

    fn detach_atomic(&mut self, _atomic: Atomic, _owner: RuleId) -> Result<()> {
        Err(StyleError::unsupported("detach_atomic"))
    }

    fn swap_branches(&mut self, _a: RuleId, _b: RuleId) -> Result<()> {
        Err(StyleError::unsupported("swap_branches"))
    }

    fn replace_branch(&mut self, _existing: RuleId, _replacement: RuleId) -> Result<()> {
        Err(StyleError::unsupported("replace_branch"))
    }

    fn attach_attribute(&mut self, _branch: RuleId, _key: &str, _value: &str) -> Result<()> {
        Err(StyleError::unsupported("attach_attribute"))
    }

    fn detach_attribute(&mut self, _branch: RuleId, _key: &str) -> Result<()> {
        Err(StyleError::unsupported("detach_attribute"))
    }

    fn handle_branch_function(&mut self, branch: RuleId, name: &str) -> Result<()> {
        self.attach_atomic(Atomic::Function(name.to_string()), branch, Position::Append)
    }

    /// Registers the rule and streams the registered rule's text. The
    /// returned identifier is usable as a class name.
    ///
    /// Registration happens before streaming, so if the sink fails the rule
    /// is already registered (and emitted) but not streamed. Calling
    /// `return_branch` again with the same rule finishes the publish; lines
    /// the sink already accepted are not appended twice.
    fn return_branch(&mut self, branch: RuleId) -> Result<String> {
        let identifier = self.registry.register(&mut self.arena, branch)?;
        let registered = self
            .registry
            .get(&identifier)
            .ok_or_else(|| StyleError::UnknownRule(identifier.clone()))?;
        let appended = self.publish(registered)?;
        if appended > 0 {
            debug!("streamed {} line(s) for `{}`", appended, identifier);
        }
        Ok(identifier)
    }

    fn is_branch_disposed(&self, _branch: RuleId) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SharedSheet;
    use crate::value::px;
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    fn boxed(library: &mut Library, name: &str, width: f64) -> RuleId {
        let id = library.create_container();
        library.attach(id, name).unwrap();
        library
            .attach(id, Command::new("width", [px(width).into()]))
            .unwrap();
        id
    }

    #[test]
    fn test_return_branch_streams_once() {
        let sheet = SharedSheet::new();
        let mut library = Library::with_sink(sheet.clone()).unwrap();

        let first = boxed(&mut library, "box", 10.0);
        let ident = library.return_branch(first).unwrap();
        let again = boxed(&mut library, "box", 10.0);
        assert_eq!(library.return_branch(again).unwrap(), ident);

        assert_eq!(sheet.rules(), vec![".box { width: 10px; }".to_string()]);
        assert_eq!(library.registry().len(), 1);
    }

    struct FlakySheet {
        sheet: SharedSheet,
        failures_left: Rc<Cell<u32>>,
    }

    impl StyleSink for FlakySheet {
        fn append(&mut self, css_text: &str) -> io::Result<()> {
            if self.failures_left.get() > 0 {
                self.failures_left.set(self.failures_left.get() - 1);
                return Err(io::Error::new(io::ErrorKind::Other, "sheet rejected rule"));
            }
            self.sheet.append(css_text)
        }
    }

    #[test]
    fn test_return_branch_retry_completes_publish() {
        let sheet = SharedSheet::new();
        let failures_left = Rc::new(Cell::new(1));
        let mut library = Library::with_sink(FlakySheet {
            sheet: sheet.clone(),
            failures_left: failures_left.clone(),
        })
        .unwrap();

        let id = boxed(&mut library, "box", 1.0);
        assert!(matches!(library.return_branch(id), Err(StyleError::Sink(_))));
        assert_eq!(library.registry().len(), 1);
        assert!(sheet.is_empty());

        let ident = library.return_branch(id).unwrap();
        assert_eq!(library.lookup(&ident), Some(id));
        assert_eq!(sheet.rules(), vec![".box { width: 1px; }".to_string()]);

        library.return_branch(id).unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(failures_left.get(), 0);
    }

    #[test]
    fn test_without_sink_streaming_is_noop() {
        let mut library = Library::new();
        library.stream(true).unwrap();
        assert!(!library.is_streaming());

        let id = boxed(&mut library, "box", 10.0);
        library.return_branch(id).unwrap();
        assert_eq!(library.publish(id).unwrap(), 0);
    }

    #[test]
    fn test_children_lists_declarations_then_rules() {
        let mut library = Library::new();
        let nested = boxed(&mut library, "inner", 1.0);
        let ident = library.return_branch(nested).unwrap();

        let outer = library.create_container();
        library.attach(outer, ident).unwrap();
        library
            .attach(outer, Command::new("color", ["red".into()]))
            .unwrap();

        let children = library.children(outer).unwrap();
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], Child::Declaration(cmd) if cmd.name() == "color"));
        assert_eq!(children[1], Child::Rule(nested));
    }

    #[test]
    fn test_branch_function_adds_uppercase_fragment() {
        let mut library = Library::new();
        let id = library.create_container();
        library.attach(id, "link").unwrap();
        library.handle_branch_function(id, "hover").unwrap();
        assert_eq!(library.rule(id).unwrap().selector_fragments(), &["link", " HOVER"]);
    }

    #[test]
    fn test_emit_minified() {
        let mut library = Library::new();
        let a = boxed(&mut library, "a", 1.0);
        library.return_branch(a).unwrap();
        let b = boxed(&mut library, "b", 2.0);
        library.return_branch(b).unwrap();

        let css = library.emit(&EmitOptions::default().with_minify(true)).unwrap();
        assert_eq!(css, ".a{width:1px}.b{width:2px}");
    }
}
