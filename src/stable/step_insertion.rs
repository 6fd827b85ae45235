use log::debug;
use serde::Serialize;

use crate::step::{check_len, run_to_completion, Highlight, Role, StepSort};

sort_impl!("stepwise_insertion_stable");

/// Sorts `v` by driving an [`InsertionSort`] engine to completion.
#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord + Copy,
{
    run_to_completion(v, InsertionSort::new);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsertionCursors {
    pub outer: usize,
    /// Element currently compared against the carried value. `None` once the scan ran past the
    /// front of the buffer.
    pub insert: Option<usize>,
}

/// Shift-and-place insertion sort.
///
/// The element at `outer` is lifted out of the buffer, larger elements in front of it are shifted
/// right one per step, and the lifted value is dropped into the gap.
#[derive(Debug, Clone)]
pub struct InsertionSort<T> {
    len: usize,
    outer: usize,
    insert: Option<usize>,
    // Present exactly while the sort is running.
    carried: Option<T>,
}

impl<T: Ord + Copy> InsertionSort<T> {
    pub fn new(v: &[T]) -> Self {
        let carried = if v.len() <= 1 { None } else { Some(v[0]) };

        Self {
            len: v.len(),
            outer: 0,
            insert: None,
            carried,
        }
    }

    #[inline]
    pub fn cursors(&self) -> InsertionCursors {
        InsertionCursors {
            outer: self.outer,
            insert: self.insert,
        }
    }

    /// The value being inserted, if the sort is still running.
    #[inline]
    pub fn carried(&self) -> Option<T> {
        self.carried
    }

    /// The slot the carried value belongs to if the shifting stopped now.
    #[inline]
    fn gap(&self) -> usize {
        self.insert.map_or(0, |i| i + 1)
    }
}

impl<T: Ord + Copy> StepSort<T> for InsertionSort<T> {
    fn step(&mut self, v: &mut [T]) {
        let Some(carried) = self.carried else {
            return;
        };
        check_len(v, self.len);

        match self.insert {
            Some(i) if v[i] > carried => {
                v[i + 1] = v[i];
                self.insert = i.checked_sub(1);
            }
            _ => {
                v[self.gap()] = carried;
                self.outer += 1;

                if self.outer < self.len {
                    self.carried = Some(v[self.outer]);
                    self.insert = Some(self.outer - 1);
                } else {
                    debug!("insertion sort done, {} elements placed", self.outer);
                    self.carried = None;
                    self.insert = None;
                }
            }
        }
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.carried.is_none()
    }

    fn highlights(&self) -> Vec<Highlight> {
        let mut out = Vec::with_capacity(2);
        if self.outer + 1 < self.len {
            out.push(Highlight::new(self.outer + 1, Role::Primary));
        }
        if let Some(i) = self.insert {
            out.push(Highlight::new(i, Role::Secondary));
        }

        out
    }

    fn snapshot(&self, v: &[T]) -> Vec<T> {
        let mut out = v.to_vec();
        if let Some(carried) = self.carried {
            out[self.gap()] = carried;
        }

        out
    }
}
