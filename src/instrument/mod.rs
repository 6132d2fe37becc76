/*
Instrument Bundles
==================

A bundle describes one instrument: its parts as note strings, plus how to
voice them. Loading parses every part, runs the voicing pipeline once, and
returns a `Chain` so the result can still be re-scaled or re-voiced.

Two bundle shapes are accepted:

1. Synth function:

     Bundle::new(notes)
         .with_synth(transform(|p| p.scale("C:major").sound("piano")))
         .with_effects(transform(|p| p.delay(0.3)))

   Each part becomes effects(synth(p).note()).

2. Scale/sound names:

     Bundle::new(notes).with_scale("C:major").with_sound("piano")

   Each part becomes effects(p.scale(scale).note().sound(sound)).

If neither shape voices the parts, effects stay pending on the returned
chain and run at its first `.sound()` call. They never run twice.

A synth function takes precedence over scale/sound names; the names are
ignored with a warning.
*/

#[cfg(feature = "serde")]
pub mod config;

use std::fmt;

use log::{debug, warn};

use crate::chain::Chain;
use crate::error::LoadError;
use crate::notation::{MiniNotation, NoteParser};
use crate::pattern::{PartMap, Pattern, PatternValue, Transform};

#[cfg(feature = "serde")]
pub use config::BundleConfig;

/// A part as written in a bundle: raw notes or an already-built pattern
#[derive(Debug, Clone, PartialEq)]
pub enum NoteSource<P> {
    Text(String),
    Pattern(P),
}

impl<P> From<&str> for NoteSource<P> {
    fn from(text: &str) -> Self {
        NoteSource::Text(text.to_string())
    }
}

impl<P> From<String> for NoteSource<P> {
    fn from(text: String) -> Self {
        NoteSource::Text(text)
    }
}

/// Everything needed to build one instrument
#[derive(Clone)]
pub struct Bundle<P> {
    pub notes: PartMap<NoteSource<P>>,
    pub synth: Option<Transform<P>>,
    pub effects: Option<Transform<P>>,
    pub scale: Option<String>,
    pub sound: Option<String>,
}

impl<P> Bundle<P> {
    pub fn new(notes: PartMap<NoteSource<P>>) -> Self {
        Self {
            notes,
            synth: None,
            effects: None,
            scale: None,
            sound: None,
        }
    }

    /// Build from `(name, notes)` pairs
    pub fn from_parts<I, K, V>(parts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<NoteSource<P>>,
    {
        Self::new(
            parts
                .into_iter()
                .map(|(name, notes)| (name.into(), notes.into()))
                .collect(),
        )
    }

    pub fn with_synth(mut self, synth: Transform<P>) -> Self {
        self.synth = Some(synth);
        self
    }

    pub fn with_effects(mut self, effects: Transform<P>) -> Self {
        self.effects = Some(effects);
        self
    }

    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }
}

impl<P: fmt::Debug> fmt::Debug for Bundle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("notes", &self.notes)
            .field("synth", &self.synth.is_some())
            .field("effects", &self.effects.is_some())
            .field("scale", &self.scale)
            .field("sound", &self.sound)
            .finish()
    }
}

/// How the loader voiced the parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Voicing {
    Synth,
    Named { sounded: bool },
    Deferred,
}

/// Loads bundles using a specific note parser
#[derive(Debug, Clone, Default)]
pub struct Loader<N> {
    parser: N,
}

impl<N> Loader<N> {
    pub fn new(parser: N) -> Self {
        Self { parser }
    }

    /// Parse, voice and wrap every part of the bundle.
    ///
    /// Parse errors are returned as-is; nothing is retried.
    pub fn load<P>(&self, bundle: Bundle<P>) -> Result<Chain<P>, LoadError>
    where
        P: PatternValue,
        N: NoteParser<P>,
    {
        let Bundle {
            notes,
            synth,
            effects,
            scale,
            sound,
        } = bundle;

        let voicing = match &synth {
            Some(_) => {
                if scale.is_some() || sound.is_some() {
                    warn!("bundle sets both a synth and scale/sound names; using the synth");
                }
                Voicing::Synth
            }
            None if scale.is_some() || sound.is_some() => Voicing::Named {
                sounded: sound.is_some(),
            },
            None => Voicing::Deferred,
        };

        let applies_effects_now = match voicing {
            Voicing::Synth => true,
            Voicing::Named { sounded } => sounded,
            Voicing::Deferred => false,
        };

        let mut parts = PartMap::new();
        for (name, source) in notes {
            let mut p = match source {
                NoteSource::Text(text) => self.parser.parse(&text)?,
                NoteSource::Pattern(p) => p,
            };

            match (voicing, &synth) {
                (Voicing::Synth, Some(synth)) => p = synth(p).note(),
                (Voicing::Named { .. }, _) => {
                    if let Some(scale) = &scale {
                        p = p.scale(scale);
                    }
                    if let Some(sound) = &sound {
                        p = p.note().sound(sound);
                    }
                }
                _ => {}
            }

            if applies_effects_now {
                if let Some(effects) = &effects {
                    p = effects(p);
                }
            }

            parts.insert(name, p);
        }

        debug!(
            "loaded instrument with {} parts ({:?}, effects {})",
            parts.len(),
            voicing,
            match (&effects, applies_effects_now) {
                (None, _) => "none",
                (Some(_), true) => "applied",
                (Some(_), false) => "deferred",
            }
        );

        let pending = if applies_effects_now { None } else { effects };
        Ok(Chain::with_effects(parts, pending))
    }
}

/// Load a bundle of mini-notation parts into [`Pattern`] graphs.
///
/// ```
/// use strudel_helpers::instrument::{load_instrument, Bundle};
/// use strudel_helpers::pattern::{transform, Pattern, PatternExt, PatternValue};
///
/// let piano = load_instrument(
///     Bundle::from_parts([("a", "0 2 4"), ("b", "5 7 9")])
///         .with_synth(transform(|p: Pattern| p.sound("piano")))
///         .with_effects(transform(|p: Pattern| p.gain(0.8))),
/// )?;
/// assert_eq!(
///     piano.get("a").unwrap().to_string(),
///     r#"n("0 2 4").sound("piano").note().gain(0.8)"#
/// );
/// # Ok::<(), strudel_helpers::LoadError>(())
/// ```
pub fn load_instrument(bundle: Bundle<Pattern>) -> Result<Chain<Pattern>, LoadError> {
    Loader::new(MiniNotation).load(bundle)
}
