//! Compiles in-memory style declarations and nested selector fragments into
//! deduplicated CSS text, optionally streaming new rules into a live sheet as
//! they are produced.
//!
//! A host creates containers through [`Library`], attaches atomics (selector
//! text, structural indices, declarations, references to finished rules) and
//! returns each container to get back its identifier, a class name that can
//! be handed to other containers to nest the rule. [`Library::emit`] writes
//! the whole registry as one document.

pub mod command;
pub mod error;
pub mod library;
pub mod properties;
pub mod registry;
pub mod rule;
pub mod stream;
pub mod style;
pub mod value;

pub use command::Command;
pub use error::{Result, StyleError};
pub use library::{Child, ContainerLibrary, Library};
pub use rule::{Rule, RuleId};
pub use stream::{NullSink, SharedSheet, StyleSink, WriterSink};
pub use style::composer::{Atomic, Position};
pub use style::serializer::EmitOptions;
pub use value::{CssValue, Unit, UnitKind};
