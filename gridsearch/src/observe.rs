use crate::grid::Grid;

/// Receives the grid every time a search has changed what is visible on it.
///
/// Observers only look: the search has the grid borrowed mutably and lends it
/// out read-only for the duration of the call.
pub trait Observer {
    /// Called after a node has been expanded and after every cell that is
    /// marked as part of the final path
    fn observe(&mut self, grid: &Grid);

    /// Polled once before every expansion. Returning `true` aborts the search,
    /// which then ends with [`SearchOutcome::Cancelled`](crate::SearchOutcome::Cancelled).
    fn should_stop(&mut self) -> bool {
        false
    }
}

impl<F: FnMut(&Grid)> Observer for F {
    fn observe(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// An observer that does nothing
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObserver;

impl Observer for NoObserver {
    fn observe(&mut self, _grid: &Grid) {}
}

/// Wraps another observer and requests the search to stop after a fixed
/// number of expansions
#[derive(Debug)]
pub struct StepLimit<O> {
    inner: O,
    remaining: usize,
}

impl<O: Observer> StepLimit<O> {
    pub fn new(inner: O, max_steps: usize) -> Self {
        Self {
            inner,
            remaining: max_steps,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Observer> Observer for StepLimit<O> {
    fn observe(&mut self, grid: &Grid) {
        self.inner.observe(grid);
    }

    fn should_stop(&mut self) -> bool {
        if self.remaining == 0 || self.inner.should_stop() {
            return true;
        }
        self.remaining -= 1;
        false
    }
}
