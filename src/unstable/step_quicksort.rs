use log::{debug, trace};
use serde::Serialize;

use crate::range::Range;
use crate::step::{check_len, run_to_completion, Highlight, Role, StepSort};

sort_impl!("stepwise_quicksort_unstable");

/// Sorts `v` by driving a [`QuickSort`] engine to completion.
#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord + Copy,
{
    run_to_completion(v, QuickSort::new);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickCursors {
    pub low: usize,
    pub high: usize,
    pub i: usize,
    pub j: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    // `i` moves right over elements not greater than the pivot.
    Left,
    // `j` moves left over elements not less than the pivot.
    Right,
}

/// Hoare style partition of one range around its first element, one cursor move or swap at a
/// time.
#[derive(Debug, Clone, Copy)]
struct Partition<T> {
    range: Range,
    // Stays at `range.low` until the final swap, so a copy is as good as a reference.
    pivot: T,
    i: usize,
    j: usize,
    scan: Scan,
}

impl<T: Ord + Copy> Partition<T> {
    fn new(range: Range, v: &[T]) -> Self {
        debug_assert!(!range.is_trivial());

        Self {
            range,
            pivot: v[range.low],
            i: range.low + 1,
            j: range.high,
            scan: Scan::Left,
        }
    }

    /// Performs one cursor move or swap. Returns the final pivot position once the range is
    /// partitioned.
    fn step(&mut self, v: &mut [T]) -> Option<usize> {
        loop {
            match self.scan {
                Scan::Left => {
                    if v[self.i] <= self.pivot && self.i < self.range.high {
                        self.i += 1;
                        return None;
                    }
                    self.scan = Scan::Right;
                }
                Scan::Right => {
                    if v[self.j] >= self.pivot && self.j > self.range.low {
                        self.j -= 1;
                        return None;
                    }

                    if self.i < self.j {
                        v.swap(self.i, self.j);
                        self.scan = Scan::Left;
                        return None;
                    }

                    // Everything up to `j` is not greater than the pivot, `v[j]` included.
                    v.swap(self.range.low, self.j);
                    return Some(self.j);
                }
            }
        }
    }

    fn cursors(&self) -> QuickCursors {
        QuickCursors {
            low: self.range.low,
            high: self.range.high,
            i: self.i,
            j: self.j,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase<T> {
    Partitioning(Partition<T>),
    /// The last partition placed its pivot, the next step pops the following range.
    Scheduling { last: Partition<T>, pivot: usize },
    Done,
}

/// In-place quicksort with first-element pivots and an explicit stack of pending ranges.
///
/// The stack starts out with the whole buffer. Whenever a partition resolves, the ranges left and
/// right of the pivot are pushed, left first, and the next range is popped on the following
/// step. Ranges with fewer than two elements need no work and are never scheduled.
///
/// Already sorted input is the worst case for this pivot choice, it degrades to `O(n^2)` steps.
#[derive(Debug, Clone)]
pub struct QuickSort<T> {
    len: usize,
    pending: Vec<Range>,
    phase: Phase<T>,
}

impl<T: Ord + Copy> QuickSort<T> {
    pub fn new(v: &[T]) -> Self {
        let len = v.len();
        // Grows past this on unbalanced input.
        let mut pending = Vec::with_capacity(2 * (len | 1).ilog2() as usize + 2);
        pending.extend(Range::full(len));

        let mut this = Self {
            len,
            pending,
            phase: Phase::Done,
        };
        debug!("quicksort over {} elements", len);

        this.schedule(v);
        this
    }

    #[inline]
    pub fn pending_ranges(&self) -> &[Range] {
        &self.pending
    }

    pub fn active_range(&self) -> Option<Range> {
        match self.phase {
            Phase::Partitioning(p) | Phase::Scheduling { last: p, .. } => Some(p.range),
            Phase::Done => None,
        }
    }

    /// Final position of the pivot of the partition that just completed.
    pub fn pivot_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Scheduling { pivot, .. } => Some(pivot),
            _ => None,
        }
    }

    #[inline]
    pub fn is_partition_complete(&self) -> bool {
        matches!(self.phase, Phase::Scheduling { .. })
    }

    pub fn cursors(&self) -> Option<QuickCursors> {
        match self.phase {
            Phase::Partitioning(p) | Phase::Scheduling { last: p, .. } => Some(p.cursors()),
            Phase::Done => None,
        }
    }

    /// Pops ranges until one needs partitioning, or finishes once the stack runs dry.
    fn schedule(&mut self, v: &[T]) {
        while let Some(range) = self.pending.pop() {
            if range.is_trivial() {
                continue;
            }

            trace!(
                "partitioning [{}, {}], {} ranges left",
                range.low,
                range.high,
                self.pending.len()
            );
            self.phase = Phase::Partitioning(Partition::new(range, v));
            return;
        }

        debug!("quicksort done");
        self.phase = Phase::Done;
    }

    fn resolve(&mut self, last: Partition<T>, pivot: usize) {
        let (left, right) = last.range.split_at_pivot(pivot);
        self.pending
            .extend([left, right].into_iter().filter(|r| !r.is_trivial()));

        if self.pending.is_empty() {
            debug!("quicksort done");
            self.phase = Phase::Done;
        } else {
            self.phase = Phase::Scheduling { last, pivot };
        }
    }
}

impl<T: Ord + Copy> StepSort<T> for QuickSort<T> {
    fn step(&mut self, v: &mut [T]) {
        let mut partition = match self.phase {
            Phase::Partitioning(p) => p,
            Phase::Scheduling { .. } => {
                check_len(v, self.len);
                self.schedule(v);
                return;
            }
            Phase::Done => return,
        };
        check_len(v, self.len);

        match partition.step(v) {
            Some(pivot) => self.resolve(partition, pivot),
            None => self.phase = Phase::Partitioning(partition),
        }
    }

    #[inline]
    fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    fn highlights(&self) -> Vec<Highlight> {
        let Some(c) = self.cursors() else {
            return Vec::new();
        };

        [
            Highlight::new(c.i, Role::Secondary),
            Highlight::new(c.j, Role::Secondary),
            Highlight::new(c.low, Role::Primary),
            Highlight::new(c.high, Role::Primary),
        ]
        .into_iter()
        .filter(|h| h.index < self.len)
        .collect()
    }

    fn snapshot(&self, v: &[T]) -> Vec<T> {
        v.to_vec()
    }
}
