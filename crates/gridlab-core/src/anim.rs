//! Host-driven animation.
//!
//! The core owns no loop and no timer. A host that wants to watch an algorithm
//! work starts an [`Animation`] and calls `tick` from its own timer; each tick
//! advances exactly one discrete step. Dropping or cancelling the animation
//! leaves whatever was painted so far, and there is no resume.

use crate::surface::ColorSurface;

/// Incremental algorithm that paints into a surface one discrete step at a
/// time. Running it to exhaustion is the batch form of the same algorithm.
pub trait Stepper<S: ColorSurface + ?Sized> {
    type Item;

    /// Take one step. `None` once nothing is left to do.
    fn step(&mut self, surface: &mut S) -> Option<Self::Item>;

    fn finish(&mut self, surface: &mut S) {
        while self.step(surface).is_some() {}
    }
}

/// Coarse animation state, `Idle → Stepping → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState { Idle, Stepping, Done }

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick<T, S> {
    /// Nothing running.
    Idle,
    /// One step was taken and produced `T`.
    Advanced(T),
    /// The stop condition was reached on this tick. The exhausted stepper is
    /// handed back so its owner can commit the result.
    Finished(S),
}

impl<T, S> Tick<T, S> {
    pub fn is_finished(&self) -> bool { matches!(self, Tick::Finished(_)) }
}

#[derive(Debug, Clone)]
pub enum Animation<S> {
    Idle,
    Stepping(S),
    Done,
}

impl<S> Default for Animation<S> {
    fn default() -> Self { Self::Idle }
}

impl<S> Animation<S> {
    pub fn start(stepper: S) -> Self { Self::Stepping(stepper) }

    pub fn state(&self) -> AnimationState {
        match self {
            Self::Idle        => AnimationState::Idle,
            Self::Stepping(_) => AnimationState::Stepping,
            Self::Done        => AnimationState::Done,
        }
    }

    pub fn is_running(&self) -> bool { matches!(self, Self::Stepping(_)) }

    /// Advance by one step. `step` returns `None` once the stepper is exhausted,
    /// which moves the animation to `Done`.
    pub fn tick<T>(&mut self, step: impl FnOnce(&mut S) -> Option<T>) -> Tick<T, S> {
        let Self::Stepping(stepper) = self else { return Tick::Idle };
        if let Some(item) = step(stepper) {
            return Tick::Advanced(item);
        }
        match std::mem::replace(self, Self::Done) {
            Self::Stepping(s) => Tick::Finished(s),
            _ => Tick::Idle,
        }
    }

    /// Stop and go back to `Idle`. Returns the stepper if one was still
    /// running so the caller can inspect partial state.
    pub fn cancel(&mut self) -> Option<S> {
        match std::mem::replace(self, Self::Idle) {
            Self::Stepping(s) => Some(s),
            _ => None,
        }
    }
}
