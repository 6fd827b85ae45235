//! The contract shared by all step engines, and a borrowing driver for them.

use log::trace;
use serde::Serialize;

use crate::error::SortError;

/// Which highlight a renderer should use for a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Secondary,
    Tertiary,
}

/// A position of interest in the buffer, as reported between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Highlight {
    pub index: usize,
    pub role: Role,
}

impl Highlight {
    #[inline]
    pub const fn new(index: usize, role: Role) -> Self {
        Self { index, role }
    }
}

/// A sorting algorithm turned into an externally driven state machine.
///
/// The buffer is lent to the engine for the duration of each [`step`](StepSort::step) call and
/// must keep the length it had when the engine was built. Passing a buffer of a different length
/// is a programming error and panics.
pub trait StepSort<T> {
    /// Performs one bounded unit of work: a comparison, a move, a swap or a scheduling decision.
    ///
    /// Does nothing once the engine is done.
    fn step(&mut self, v: &mut [T]);

    fn is_done(&self) -> bool;

    /// Positions a renderer should highlight in the current state. Sentinel positions outside
    /// the buffer are left out.
    fn highlights(&self) -> Vec<Highlight>;

    /// The logical contents of the sorted sequence: `v` with every element the engine currently
    /// holds outside the buffer put back into the slot it belongs to.
    ///
    /// This is always a permutation of the original input.
    fn snapshot(&self, v: &[T]) -> Vec<T>
    where
        T: Copy;
}

/// Panics unless `v` still has the length the engine was built for.
#[inline]
#[track_caller]
pub(crate) fn check_len<T>(v: &[T], len: usize) {
    assert_eq!(
        v.len(),
        len,
        "buffer length changed while sorting: expected {len}, got {}",
        v.len()
    );
}

/// Validates a signed element count against a buffer, returning the usable prefix.
pub fn array_view<T>(buf: &mut [T], len: isize) -> Result<&mut [T], SortError> {
    let len = usize::try_from(len).map_err(|_| SortError::InvalidLength(len))?;
    if len > buf.len() {
        return Err(SortError::OutOfRangeAccess {
            index: len,
            len: buf.len(),
        });
    }

    Ok(&mut buf[..len])
}

/// Holds the exclusive borrow of a buffer together with the engine sorting it.
///
/// ```ignore
/// let mut v = [5, 3, 8, 1];
/// let mut stepper = Stepper::new(&mut v, MergeSort::new);
/// while stepper.step() {}
/// assert_eq!(stepper.as_slice(), [1, 3, 5, 8]);
/// ```
pub struct Stepper<'a, T, E> {
    v: &'a mut [T],
    engine: E,
    steps: usize,
}

impl<'a, T, E> Stepper<'a, T, E>
where
    E: StepSort<T>,
{
    pub fn new<F>(v: &'a mut [T], init: F) -> Self
    where
        F: FnOnce(&[T]) -> E,
    {
        let engine = init(&*v);
        Self { v, engine, steps: 0 }
    }

    /// Sorts the first `len` elements of `buf`.
    ///
    /// Fails with [`SortError::InvalidLength`] for a negative `len` and with
    /// [`SortError::OutOfRangeAccess`] if `len` exceeds the buffer.
    pub fn with_len<F>(buf: &'a mut [T], len: isize, init: F) -> Result<Self, SortError>
    where
        F: FnOnce(&[T]) -> E,
    {
        Ok(Self::new(array_view(buf, len)?, init))
    }

    /// Advances the engine by one step. Returns `false` without doing anything if it is done.
    pub fn step(&mut self) -> bool {
        if self.engine.is_done() {
            return false;
        }

        self.engine.step(&mut *self.v);
        self.steps += 1;
        trace!("step {}: done={}", self.steps, self.engine.is_done());

        true
    }

    /// Steps until done and returns the number of steps taken by this call.
    pub fn run(&mut self) -> usize {
        let start = self.steps;
        while self.step() {}
        self.steps - start
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.engine.is_done()
    }

    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.v
    }

    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn highlights(&self) -> Vec<Highlight> {
        self.engine.highlights()
    }

    pub fn snapshot(&self) -> Vec<T>
    where
        T: Copy,
    {
        self.engine.snapshot(self.v)
    }

    /// Drops the engine and hands the buffer back.
    pub fn into_inner(self) -> &'a mut [T] {
        self.v
    }
}

/// Drives a freshly built engine over `v` until it is done.
pub(crate) fn run_to_completion<T, E, F>(v: &mut [T], init: F) -> usize
where
    E: StepSort<T>,
    F: FnOnce(&[T]) -> E,
{
    Stepper::new(v, init).run()
}
