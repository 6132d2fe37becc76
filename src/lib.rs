pub mod chain; // Broadcast scale/sound over named parts
pub mod error;
pub mod instrument; // Bundle loading
pub mod notation; // Mini-notation note strings
pub mod pattern; // Pattern capabilities and the declarative graph

pub use chain::{build_chainable, Chain};
pub use error::{ConfigurationError, LoadError};
pub use instrument::{load_instrument, Bundle, Loader, NoteSource};
pub use notation::{MiniNotation, NoteParser, ParseError};
pub use pattern::{PartMap, Pattern, PatternExt, PatternValue, Transform};
