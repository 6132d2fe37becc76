//! Pattern values and the transforms applied to them.
//!
//! A pattern value is an opaque musical sequence owned by the pattern engine.
//! This crate never renders one; it only asks for three capabilities
//! (`scale`, `note`, `sound`) and threads user-supplied transforms through
//! them. [`Pattern`] is a concrete, declarative implementation that records
//! the operations applied to it and prints them back as Strudel code.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Fluent effect helpers (`.gain()`, `.delay()`, etc.).
pub mod extensions;
/// Declarative pattern graph that renders to Strudel source.
pub mod value;

pub use extensions::{Controllable, PatternExt};
pub use value::{is_js_identifier, ControlValue, Op, Pattern, Source};

/// Capability set the core needs from a pattern value.
///
/// Every operation consumes the value and returns a new one, mirroring the
/// engine's immutable chaining (`p.scale("C:major").note().sound("piano")`).
pub trait PatternValue: Clone {
    /// Map scale degrees onto the named scale (e.g. `"C:major"`).
    fn scale(self, name: &str) -> Self;

    /// Mark the value as a note-domain pattern so the engine can voice it.
    fn note(self) -> Self;

    /// Select the instrument sound used to voice the pattern.
    fn sound(self, name: &str) -> Self;
}

/// Named parts of one instrument (`a`, `b`, `c`, ...).
pub type PartMap<P> = BTreeMap<String, P>;

/// A shared `P -> P` function, used for synth setup and effects chains.
pub type Transform<P> = Arc<dyn Fn(P) -> P + Send + Sync>;

/// Box a closure as a [`Transform`].
///
/// ```
/// use strudel_helpers::pattern::{transform, Pattern, PatternExt};
///
/// let effects = transform(|p: Pattern| p.gain(0.8).delay(0.3));
/// ```
pub fn transform<P, F>(f: F) -> Transform<P>
where
    F: Fn(P) -> P + Send + Sync + 'static,
{
    Arc::new(f)
}
