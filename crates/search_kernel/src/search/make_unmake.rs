//! Move making and unmaking for search
//!
//! [`Played`] applies a move on construction and undoes it on drop, so a frame's mutation
//! is reverted on every exit path: normal return, cutoff `break`, early `return`, or a
//! panic unwinding through the recursion.

use crate::position::Position;
use std::ops::{Deref, DerefMut};

/// A position with one move applied, reverted when the guard goes out of scope
pub struct Played<'a, P: Position> {
    position: &'a mut P,
}

impl<'a, P: Position> Played<'a, P> {
    /// Make a move on the position (undone when the guard drops)
    pub fn new(position: &'a mut P, mv: &P::Move) -> Self {
        position.apply(mv);
        Self { position }
    }
}

impl<P: Position> Deref for Played<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: Position> DerefMut for Played<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: Position> Drop for Played<'_, P> {
    fn drop(&mut self) {
        self.position.undo();
    }
}
