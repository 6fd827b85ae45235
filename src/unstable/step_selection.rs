use log::debug;
use serde::Serialize;

use crate::step::{check_len, run_to_completion, Highlight, Role, StepSort};

sort_impl!("stepwise_selection_unstable");

/// Sorts `v` by driving a [`SelectionSort`] engine to completion.
#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord + Copy,
{
    run_to_completion(v, SelectionSort::new);
}

/// Indices a renderer needs to show a selection sort in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionCursors {
    /// Slot that receives the minimum once the scan finishes.
    pub outer: usize,
    /// Next element to compare against the current minimum. Reaches `len` when the scan ends.
    pub inner: usize,
    pub min: usize,
}

/// Scan-and-swap selection sort.
///
/// Every step either compares one element against the current minimum, or, once the scan
/// reached the end, swaps the minimum into place and starts the next scan.
#[derive(Debug, Clone)]
pub struct SelectionSort {
    len: usize,
    outer: usize,
    inner: usize,
    min: usize,
    done: bool,
}

impl SelectionSort {
    pub fn new<T: Ord>(v: &[T]) -> Self {
        let len = v.len();

        Self {
            len,
            outer: 0,
            inner: 0,
            min: 0,
            done: len <= 1,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[inline]
    pub fn cursors(&self) -> SelectionCursors {
        SelectionCursors {
            outer: self.outer,
            inner: self.inner,
            min: self.min,
        }
    }
}

impl<T: Ord> StepSort<T> for SelectionSort {
    fn step(&mut self, v: &mut [T]) {
        if self.done {
            return;
        }
        check_len(v, self.len);

        if self.inner < self.len {
            if v[self.inner] < v[self.min] {
                self.min = self.inner;
            }
            self.inner += 1;
            return;
        }

        v.swap(self.outer, self.min);
        self.outer += 1;
        self.inner = self.outer + 1;
        self.min = self.outer;

        // The last slot holds the maximum once every other slot is filled.
        if self.outer >= self.len - 1 {
            debug!("selection sort done after placing {} elements", self.outer);
            self.done = true;
        }
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.done
    }

    fn highlights(&self) -> Vec<Highlight> {
        [
            Highlight::new(self.outer, Role::Primary),
            Highlight::new(self.inner, Role::Secondary),
            Highlight::new(self.min, Role::Tertiary),
        ]
        .into_iter()
        .filter(|h| h.index < self.len)
        .collect()
    }

    fn snapshot(&self, v: &[T]) -> Vec<T>
    where
        T: Copy,
    {
        v.to_vec()
    }
}
