//! Step-indicator transition timings.
//!
//! Base timings are fixed; a single speed multiplier scales every duration and delay.
//! A multiplier of `1.0` gives the normal speed, larger values slow the animation down.

use reelpost_core::constants::MAX_ANIMATION_SPEED_MULTIPLIER;
use std::time::Duration;
use thiserror::Error;

const BACKGROUND_SECS: f64 = 0.2;
const RIPPLE_SECS: f64 = 0.6;
const RIPPLE_DELAY_SECS: f64 = 0.2;
const RIPPLE_ACTIVATE_SECS: f64 = 0.3;
const CHECK_ICON_SECS: f64 = 0.3;
const CHECK_ICON_DELAY_SECS: f64 = 0.2;

#[derive(Debug, Error, PartialEq)]
#[error(
    "animation speed multiplier must be greater than 0 and at most {max}, got {0}",
    max = MAX_ANIMATION_SPEED_MULTIPLIER
)]
pub struct InvalidSpeedMultiplier(pub f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Host default curve
    Default,
    CircOut,
    EaseOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

/// All transitions used by one step indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTimings {
    pub background: Transition,
    pub ripple: Transition,
    pub ripple_activate: Transition,
    pub check_icon: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    speed_multiplier: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
        }
    }
}

impl AnimationConfig {
    pub fn new(speed_multiplier: f64) -> Result<Self, InvalidSpeedMultiplier> {
        if !speed_multiplier.is_finite()
            || speed_multiplier <= 0.0
            || speed_multiplier > MAX_ANIMATION_SPEED_MULTIPLIER
        {
            return Err(InvalidSpeedMultiplier(speed_multiplier));
        }
        Ok(Self { speed_multiplier })
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    fn scaled(&self, secs: f64) -> Duration {
        Duration::from_secs_f64(secs * self.speed_multiplier)
    }

    fn transition(&self, secs: f64, delay_secs: f64, easing: Easing) -> Transition {
        Transition {
            duration: self.scaled(secs),
            delay: self.scaled(delay_secs),
            easing,
        }
    }

    /// Indicator background color change.
    pub fn background(&self) -> Transition {
        self.transition(BACKGROUND_SECS, 0.0, Easing::Default)
    }

    /// Ripple expanding behind a completed indicator.
    pub fn ripple(&self) -> Transition {
        self.transition(RIPPLE_SECS, RIPPLE_DELAY_SECS, Easing::CircOut)
    }

    /// Ripple scale-in when an indicator becomes active.
    pub fn ripple_activate(&self) -> Transition {
        self.transition(RIPPLE_ACTIVATE_SECS, 0.0, Easing::Default)
    }

    /// Check mark drawn on a completed indicator.
    pub fn check_icon(&self) -> Transition {
        self.transition(CHECK_ICON_SECS, CHECK_ICON_DELAY_SECS, Easing::EaseOut)
    }

    pub fn timings(&self) -> StepTimings {
        StepTimings {
            background: self.background(),
            ripple: self.ripple(),
            ripple_activate: self.ripple_activate(),
            check_icon: self.check_icon(),
        }
    }
}
