use super::{ControlValue, PatternValue};

/// Pattern values that accept arbitrary named controls (`.gain()`, `.room()`...).
///
/// Effects functions are usually written against this, so the same closure
/// works for any engine binding that can record a control call.
pub trait Controllable: PatternValue {
    fn control(self, name: &str, value: ControlValue) -> Self;
}

/// Fluent helpers for the controls most effects chains reach for.
pub trait PatternExt: Controllable + Sized {
    fn gain(self, amount: f64) -> Self {
        self.control("gain", amount.into())
    }

    /// Delay send level (0.0 - 1.0)
    fn delay(self, amount: f64) -> Self {
        self.control("delay", amount.into())
    }

    /// Reverb send level
    fn room(self, amount: f64) -> Self {
        self.control("room", amount.into())
    }

    /// Low-pass cutoff in Hz
    fn lpf(self, cutoff: f64) -> Self {
        self.control("lpf", cutoff.into())
    }

    /// High-pass cutoff in Hz
    fn hpf(self, cutoff: f64) -> Self {
        self.control("hpf", cutoff.into())
    }

    /// Stereo position, 0.0 (left) to 1.0 (right)
    fn pan(self, position: f64) -> Self {
        self.control("pan", position.into())
    }

    fn speed(self, rate: f64) -> Self {
        self.control("speed", rate.into())
    }
}

impl<T: Controllable> PatternExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Op, Pattern};

    #[test]
    fn test_helpers_record_named_controls() {
        let p = Pattern::from_code("n(\"0\")")
            .room(0.4)
            .hpf(300.0)
            .pan(0.25)
            .speed(2.0);
        let names: Vec<&str> = p
            .ops()
            .iter()
            .filter_map(|op| match op {
                Op::Control { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["room", "hpf", "pan", "speed"]);
    }
}
