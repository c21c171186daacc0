//! Values that can appear on the right-hand side of a declaration.

use crate::command::Command;
use std::fmt;

/// Top-level value for all possible inputs to a property factory.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Raw keyword or pre-formatted text, e.g. `auto` or `10px`.
    Text(String),
    Number(f64),
    /// A function-style value such as `rgb(1, 2, 3)`.
    Command(Command),
    Unit(Unit),
    /// One comma-separated layer of a multi-layer value (`transition: a 1s, b 2s`).
    List(Vec<CssValue>),
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Text(text) => f.write_str(text),
            CssValue::Number(number) => write!(f, "{}", number),
            CssValue::Command(command) => write!(f, "{}", command.as_function()),
            CssValue::Unit(unit) => write!(f, "{}", unit),
            CssValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for CssValue {
    fn from(text: &str) -> Self {
        CssValue::Text(text.to_string())
    }
}

impl From<String> for CssValue {
    fn from(text: String) -> Self {
        CssValue::Text(text)
    }
}

impl From<f64> for CssValue {
    fn from(number: f64) -> Self {
        CssValue::Number(number)
    }
}

impl From<i32> for CssValue {
    fn from(number: i32) -> Self {
        CssValue::Number(number as f64)
    }
}

impl From<Unit> for CssValue {
    fn from(unit: Unit) -> Self {
        CssValue::Unit(unit)
    }
}

impl From<Command> for CssValue {
    fn from(command: Command) -> Self {
        CssValue::Command(command)
    }
}

impl From<Vec<CssValue>> for CssValue {
    fn from(items: Vec<CssValue>) -> Self {
        CssValue::List(items)
    }
}

/// Supported CSS dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Px,
    Em,
    Rem,
    Percent,
    Vw,
    Vh,
    Vmin,
    Vmax,
    Ch,
    Ex,
    Pt,
    Cm,
    Mm,
    In,
    Deg,
    Rad,
    Turn,
    S,
    Ms,
    Fr,
}

impl UnitKind {
    /// The suffix written directly after the number.
    pub fn suffix(self) -> &'static str {
        match self {
            UnitKind::Px => "px",
            UnitKind::Em => "em",
            UnitKind::Rem => "rem",
            UnitKind::Percent => "%",
            UnitKind::Vw => "vw",
            UnitKind::Vh => "vh",
            UnitKind::Vmin => "vmin",
            UnitKind::Vmax => "vmax",
            UnitKind::Ch => "ch",
            UnitKind::Ex => "ex",
            UnitKind::Pt => "pt",
            UnitKind::Cm => "cm",
            UnitKind::Mm => "mm",
            UnitKind::In => "in",
            UnitKind::Deg => "deg",
            UnitKind::Rad => "rad",
            UnitKind::Turn => "turn",
            UnitKind::S => "s",
            UnitKind::Ms => "ms",
            UnitKind::Fr => "fr",
        }
    }
}

/// A dimensioned number, e.g. `10px` or `50%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub value: f64,
    pub kind: UnitKind,
}

impl Unit {
    pub fn new(value: f64, kind: UnitKind) -> Self {
        Unit { value, kind }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.kind.suffix())
    }
}

pub fn px(value: f64) -> Unit {
    Unit::new(value, UnitKind::Px)
}

pub fn em(value: f64) -> Unit {
    Unit::new(value, UnitKind::Em)
}

pub fn rem(value: f64) -> Unit {
    Unit::new(value, UnitKind::Rem)
}

pub fn percent(value: f64) -> Unit {
    Unit::new(value, UnitKind::Percent)
}

pub fn vw(value: f64) -> Unit {
    Unit::new(value, UnitKind::Vw)
}

pub fn vh(value: f64) -> Unit {
    Unit::new(value, UnitKind::Vh)
}

pub fn deg(value: f64) -> Unit {
    Unit::new(value, UnitKind::Deg)
}

pub fn ms(value: f64) -> Unit {
    Unit::new(value, UnitKind::Ms)
}

pub fn fr(value: f64) -> Unit {
    Unit::new(value, UnitKind::Fr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_drop_trailing_zero() {
        assert_eq!(CssValue::from(10.0).to_string(), "10");
        assert_eq!(CssValue::from(0.5).to_string(), "0.5");
        assert_eq!(CssValue::from(-3).to_string(), "-3");
    }

    #[test]
    fn test_units() {
        assert_eq!(px(10.0).to_string(), "10px");
        assert_eq!(percent(33.5).to_string(), "33.5%");
        assert_eq!(Unit::new(1.0, UnitKind::Turn).to_string(), "1turn");
    }

    #[test]
    fn test_list_is_space_separated() {
        let layer = CssValue::from(vec![CssValue::from("opacity"), ms(200.0).into()]);
        assert_eq!(layer.to_string(), "opacity 200ms");
    }
}
