//! A single CSS declaration, e.g. `width: 10px`.

use crate::value::CssValue;
use std::fmt;

/// One declaration (or one function-style value when nested inside another
/// declaration). Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    values: Vec<CssValue>,
}

impl Command {
    /// `name` is the camelCase property name, e.g. `insetBlockEnd`.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = CssValue>) -> Self {
        Command {
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[CssValue] {
        &self.values
    }

    /// The hyphenated CSS form of the name.
    pub fn property_name(&self) -> String {
        kebab_case(&self.name)
    }

    /// The value list as it appears after the colon.
    ///
    /// Values are separated by a single space, except when every value is a
    /// [`CssValue::List`] layer, in which case layers are comma separated.
    pub fn value_text(&self) -> String {
        let layered =
            !self.values.is_empty() && self.values.iter().all(|v| matches!(v, CssValue::List(_)));
        let separator = if layered { ", " } else { " " };
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Renders as a declaration: `property-name: values;`.
    pub fn to_declaration(&self) -> String {
        format!("{}: {};", self.property_name(), self.value_text())
    }

    /// Renders as a function-style value: `name(a, b)`.
    pub fn as_function(&self) -> String {
        let args = self
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.property_name(), args)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_declaration())
    }
}

/// Converts a camelCase identifier to its hyphenated CSS form.
///
/// A leading capital produces a leading hyphen, which is how vendor
/// prefixed properties are spelled (`WebkitTransform` -> `-webkit-transform`).
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
