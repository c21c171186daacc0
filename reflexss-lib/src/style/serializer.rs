//! Turns rules into CSS text.
//!
//! Every rule produces exactly one block of its own followed by the blocks of
//! its children. Children are written as independent blocks right after their
//! container; nesting only decides ordering, never CSS nesting syntax.

use crate::command::Command;
use crate::error::Result;
use crate::registry;
use crate::rule::{RuleArena, RuleId};

/// Formatting options for [`to_string_array`] and `Library::emit`.
///
/// Defaults: `line` is `"\n"`, `indent` is empty and `minify` is off. With an
/// empty indent each block is written on a single line
/// (`.box { width: 10px; }`); with a non-empty indent every declaration goes on
/// its own line, prefixed by `indent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Separator between lines. Blocks in an emitted document are separated
    /// by two of these.
    pub line: String,
    /// Prefix for declaration lines.
    pub indent: String,
    /// Re-print the emitted document through lightningcss' minifier.
    pub minify: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            line: "\n".to_string(),
            indent: String::new(),
            minify: false,
        }
    }
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = line.into();
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }
}

/// Serializes a rule and, after it, each of its children.
pub fn to_string_array(arena: &RuleArena, id: RuleId, options: &EmitOptions) -> Result<Vec<String>> {
    let mut out = Vec::new();
    write_rule(arena, id, options, &mut out)?;
    Ok(out)
}

fn write_rule(arena: &RuleArena, id: RuleId, options: &EmitOptions, out: &mut Vec<String>) -> Result<()> {
    let rule = arena.get(id)?;
    let selector = selector_text(arena, id)?;
    out.push(render_block(&selector, &rule.declarations, options));
    for &child in &rule.children {
        write_rule(arena, child, options, out)?;
    }
    Ok(())
}

/// The full selector of a rule.
///
/// Bare words become class selectors; fragments that carry their own
/// punctuation are written as-is. A rule without a leading subject (no
/// fragments, or one starting with a pseudo class or combinator) is anchored
/// on its identifier's class.
pub fn selector_text(arena: &RuleArena, id: RuleId) -> Result<String> {
    let rule = arena.get(id)?;
    let mut selector = String::new();

    let anchored = rule
        .selector_fragments
        .first()
        .is_some_and(|first| has_subject(first));
    if !anchored {
        selector.push('.');
        selector.push_str(&registry::identifier_of(arena, id)?);
    }

    for fragment in &rule.selector_fragments {
        if needs_class_marker(fragment) {
            selector.push('.');
        }
        selector.push_str(fragment);
    }
    Ok(selector)
}

fn needs_class_marker(fragment: &str) -> bool {
    fragment
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

fn has_subject(fragment: &str) -> bool {
    needs_class_marker(fragment) || fragment.starts_with(['.', '#', '[', '*', '&'])
}

fn render_block(selector: &str, declarations: &[Command], options: &EmitOptions) -> String {
    let mut block = format!("{} {{", selector);
    if options.indent.is_empty() {
        for decl in declarations {
            block.push(' ');
            block.push_str(&decl.to_declaration());
        }
        block.push_str(" }");
    } else {
        for decl in declarations {
            block.push_str(&options.line);
            block.push_str(&options.indent);
            block.push_str(&decl.to_declaration());
        }
        block.push_str(&options.line);
        block.push('}');
    }
    block
}
