use crate::motion::tween::Timing;
use crate::motion::{Ease, Stagger, Tween};

/// Base unit for every preset duration, in seconds.
pub const GOLDEN_RATIO: f64 = 0.618;

pub mod durations {
    use super::GOLDEN_RATIO;

    pub const INSTANT: f64 = 0.0;
    pub const FAST: f64 = GOLDEN_RATIO * 0.5;
    pub const NORMAL: f64 = GOLDEN_RATIO;
    pub const SLOW: f64 = GOLDEN_RATIO * 1.618;
    pub const DRAMATIC: f64 = GOLDEN_RATIO * 2.618;
}

pub mod eases {
    use crate::motion::Ease;

    pub const SMOOTH: Ease = Ease::Power2Out;
    pub const SHARP: Ease = Ease::Power4InOut;
    pub const BOUNCE: Ease = Ease::ElasticOut;
    pub const GENTLE: Ease = Ease::SineInOut;
    pub const DRAMATIC: Ease = Ease::ExpoOut;
    pub const NATURAL: Ease = Ease::Power1InOut;
}

pub mod staggers {
    use super::eases;
    use crate::motion::{Stagger, StaggerFrom};

    pub const QUICK: Stagger = Stagger::amount(0.2);
    pub const NORMAL: Stagger = Stagger::amount(0.6);
    pub const SLOW: Stagger = Stagger::amount(1.2);
    pub const CASCADE: Stagger = Stagger::amount(0.8).from(StaggerFrom::Start).ease(eases::GENTLE);
}

#[cfg(debug_assertions)]
fn null_target_warn() -> bool {
    true // Noisy selectors are worth knowing about while developing
}

#[cfg(not(debug_assertions))]
fn null_target_warn() -> bool {
    false
}

/// Process-wide animation defaults, built once in `main` and handed to every
/// engine through the component tree.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub default_duration: f64,
    pub default_ease: Ease,
    pub default_stagger: Stagger,
    /// Warn when a selector inside an effect matches nothing.
    pub null_target_warn: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            default_duration: durations::NORMAL,
            default_ease: eases::SMOOTH,
            default_stagger: staggers::NORMAL,
            null_target_warn: null_target_warn(),
        }
    }
}

impl MotionConfig {
    /// Fills the gaps of a tween with the configured defaults.
    pub fn resolve(&self, tween: &Tween) -> Timing {
        let duration = tween.duration.unwrap_or(self.default_duration).max(0.0);
        let iterations = match tween.repeat {
            r if r < 0 => f64::INFINITY,
            r => f64::from(r) + 1.0,
        };
        Timing {
            duration_ms: duration * 1000.0,
            delay_ms: tween.delay.max(0.0) * 1000.0,
            easing: tween.ease.unwrap_or(self.default_ease).css(),
            iterations,
            alternate: tween.yoyo,
        }
    }

    /// Delay in milliseconds added to the `index`th of `count` targets.
    pub fn stagger_offset_ms(&self, tween: &Tween, index: usize, count: usize) -> f64 {
        tween
            .stagger
            .map(|stagger| stagger.offset(index, count) * 1000.0)
            .unwrap_or(0.0)
    }
}
