/*
Chainable Part Broadcasting
===========================

A `Chain` holds the named parts of one instrument and lets you treat them as
a single voice. Every call broadcasts the same operation to every part and
returns a fresh `Chain`, so calls compose to any length:

  let lead = build_chainable(parts)
      .scale("C:minor")      // every part: p.scale("C:minor")
      .sound("sawtooth");    // every part: p.note().sound("sawtooth")

Parts live in their own map and the operations live on the type, so a part
may be called "scale" or "sound" without being mistaken for a method.

Pending Effects:
----------------
A chain can carry an effects transform that has not run yet. `scale()` keeps
it pending; the first `sound()` applies it to every part and the returned
chain no longer carries it. Effects therefore run exactly once, as the last
per-voice step:

  Chain::with_effects(parts, fx)
      .scale("C:major")      // fx still pending
      .sound("piano")        // p.note().sound("piano") then fx(p)
      .sound("organ")        // p.note().sound("organ"), fx not applied again
*/

use std::fmt;

use log::trace;

use crate::pattern::{PartMap, PatternValue, Transform};

/// Named parts plus an optional effects transform still waiting to run
#[derive(Clone)]
pub struct Chain<P> {
    parts: PartMap<P>,
    pending_effects: Option<Transform<P>>,
}

/// Wrap a set of parts so `.scale()` / `.sound()` can be broadcast over them
pub fn build_chainable<P: PatternValue>(parts: PartMap<P>) -> Chain<P> {
    Chain::new(parts)
}

impl<P: PatternValue> Chain<P> {
    /// Wrap parts with no pending effects
    pub fn new(parts: PartMap<P>) -> Self {
        Self {
            parts,
            pending_effects: None,
        }
    }

    /// Wrap parts with effects to apply at the next `sound()` call
    pub fn with_effects(parts: PartMap<P>, effects: Option<Transform<P>>) -> Self {
        Self {
            parts,
            pending_effects: effects,
        }
    }

    /// Apply `p.scale(name)` to every part; pending effects stay pending
    pub fn scale(&self, name: &str) -> Self {
        trace!("broadcasting scale({name}) across {} parts", self.parts.len());
        Self::with_effects(
            self.broadcast(|p| p.scale(name)),
            self.pending_effects.clone(),
        )
    }

    /// Apply `p.note().sound(name)` to every part, then any pending effects
    pub fn sound(&self, name: &str) -> Self {
        trace!(
            "broadcasting sound({name}) across {} parts (effects pending: {})",
            self.parts.len(),
            self.pending_effects.is_some()
        );
        let parts = match &self.pending_effects {
            Some(effects) => self.broadcast(|p| effects(p.note().sound(name))),
            None => self.broadcast(|p| p.note().sound(name)),
        };
        Self::new(parts)
    }

    /// Apply an arbitrary transform to every part; pending effects stay pending
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(P) -> P,
    {
        Self::with_effects(self.broadcast(f), self.pending_effects.clone())
    }

    fn broadcast<F>(&self, f: F) -> PartMap<P>
    where
        F: Fn(P) -> P,
    {
        self.parts
            .iter()
            .map(|(name, part)| (name.clone(), f(part.clone())))
            .collect()
    }
}

impl<P> Chain<P> {
    pub fn parts(&self) -> &PartMap<P> {
        &self.parts
    }

    pub fn get(&self, name: &str) -> Option<&P> {
        self.parts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// Part names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &P)> {
        self.parts.iter().map(|(name, part)| (name.as_str(), part))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// True until a `sound()` call has applied the effects
    pub fn has_pending_effects(&self) -> bool {
        self.pending_effects.is_some()
    }

    /// Drop the chain and keep the parts (pending effects are discarded)
    pub fn into_parts(self) -> PartMap<P> {
        self.parts
    }
}

impl<P: fmt::Debug> fmt::Debug for Chain<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("parts", &self.parts)
            .field("pending_effects", &self.pending_effects.is_some())
            .finish()
    }
}

impl<P> IntoIterator for Chain<P> {
    type Item = (String, P);
    type IntoIter = std::collections::btree_map::IntoIter<String, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a Chain<P> {
    type Item = (&'a String, &'a P);
    type IntoIter = std::collections::btree_map::Iter<'a, String, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::{MiniNotation, NoteParser};
    use crate::pattern::{transform, Op, Pattern, PatternExt};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn parts(entries: &[(&str, &str)]) -> PartMap<Pattern> {
        entries
            .iter()
            .map(|(name, notes)| (name.to_string(), MiniNotation.parse(notes).unwrap()))
            .collect()
    }

    fn keys<P>(chain: &Chain<P>) -> Vec<&str> {
        chain.names().collect()
    }

    #[test]
    fn test_scale_broadcasts_to_every_part() {
        let input = parts(&[("a", "0 2 4"), ("b", "5 7 9")]);
        let chain = build_chainable(input.clone()).scale("C:major");

        assert_eq!(keys(&chain), vec!["a", "b"]);
        for (name, part) in chain.iter() {
            let expected = input[name].clone().scale("C:major");
            assert_eq!(part, &expected);
        }
    }

    #[test]
    fn test_scale_does_not_mutate_input_chain() {
        let original = build_chainable(parts(&[("a", "0 1")]));
        let _scaled = original.scale("C:major").scale("D:minor");
        assert!(original.get("a").unwrap().ops().is_empty());
    }

    #[test]
    fn test_sound_applies_note_then_sound() {
        let chain = build_chainable(parts(&[("a", "0"), ("b", "1"), ("c", "2")])).sound("piano");

        assert_eq!(keys(&chain), vec!["a", "b", "c"]);
        for (_, part) in &chain {
            assert_eq!(part.ops(), &[Op::Note, Op::Sound("piano".into())]);
        }
    }

    #[test]
    fn test_chain_shape_survives_any_number_of_calls() {
        let chain = build_chainable(parts(&[("a", "0 2")]))
            .scale("C:major")
            .sound("piano")
            .scale("E:minor")
            .sound("organ");

        assert_eq!(
            chain.get("a").unwrap().to_string(),
            r#"n("0 2").scale("C:major").note().sound("piano").scale("E:minor").note().sound("organ")"#
        );
    }

    #[test]
    fn test_scale_keeps_effects_pending() {
        let fx = transform(|p: Pattern| p.gain(0.8));
        let chain = Chain::with_effects(parts(&[("a", "0")]), Some(fx)).scale("C:major");

        assert!(chain.has_pending_effects());
        assert_eq!(chain.get("a").unwrap().count_control("gain"), 0);
    }

    #[test]
    fn test_effects_apply_once_on_first_sound() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let fx = transform(move |p: Pattern| {
            counter.fetch_add(1, Ordering::SeqCst);
            p.gain(0.8)
        });

        let chain = Chain::with_effects(parts(&[("a", "0"), ("b", "1")]), Some(fx))
            .scale("C:major")
            .sound("piano");
        assert!(!chain.has_pending_effects());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let again = chain.sound("organ");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        for (_, part) in &again {
            assert_eq!(part.count_control("gain"), 1);
            assert_eq!(
                part.ops().last(),
                Some(&Op::Sound("organ".into()))
            );
        }
    }

    #[test]
    fn test_effects_run_after_sound() {
        let fx = transform(|p: Pattern| p.delay(0.3));
        let chain = Chain::with_effects(parts(&[("a", "0")]), Some(fx)).sound("piano");
        assert_eq!(
            chain.get("a").unwrap().to_string(),
            r#"n("0").note().sound("piano").delay(0.3)"#
        );
    }

    #[test]
    fn test_empty_chain_is_not_an_error() {
        let chain: Chain<Pattern> = build_chainable(PartMap::new());
        assert!(chain.scale("C:major").is_empty());
        assert!(chain.sound("piano").is_empty());
        assert_eq!(chain.sound("piano").len(), 0);
    }

    #[test]
    fn test_parts_named_like_methods_are_kept() {
        let chain = build_chainable(parts(&[("scale", "0"), ("sound", "1"), ("a", "2")]))
            .scale("C:major")
            .sound("piano");

        assert_eq!(keys(&chain), vec!["a", "scale", "sound"]);
        assert!(chain.contains("scale"));
        assert_eq!(
            chain.get("sound").unwrap().to_string(),
            r#"n("1").scale("C:major").note().sound("piano")"#
        );
    }

    #[test]
    fn test_map_broadcasts_custom_transform() {
        let chain = build_chainable(parts(&[("a", "0"), ("b", "1")])).map(|p| p.room(0.5));
        for (_, part) in &chain {
            assert_eq!(part.count_control("room"), 1);
        }
    }

    #[test]
    fn test_into_parts_returns_plain_map() {
        let map = build_chainable(parts(&[("a", "0"), ("b", "1")]))
            .sound("piano")
            .into_parts();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("a"));
    }
}
