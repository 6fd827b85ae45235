use log::{debug, trace};
use serde::Serialize;

use crate::range::Range;
use crate::step::{check_len, run_to_completion, Highlight, Role, StepSort};

sort_impl!("stepwise_merge_stable");

/// Sorts `v` by driving a [`MergeSort`] engine to completion.
#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord + Copy,
{
    run_to_completion(v, MergeSort::new);
}

/// Absolute positions of the active merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeCursors {
    pub low: usize,
    pub high: usize,
    /// Next element of the left half, `low + a_idx`.
    pub left: usize,
    /// Next element of the right half, `mid + 1 + b_idx`.
    pub right: usize,
    /// Next slot to be written, `low + write_idx`.
    pub write: usize,
}

#[derive(Debug, Clone, Copy)]
struct Merge {
    range: Range,
    mid: usize,
    // Read cursors into the left and right scratch buffers.
    a: usize,
    b: usize,
    // Offset from `range.low` of the next slot to write.
    write: usize,
}

impl Merge {
    fn cursors(&self) -> MergeCursors {
        MergeCursors {
            low: self.range.low,
            high: self.range.high,
            left: self.range.low + self.a,
            right: self.mid + 1 + self.b,
            write: self.range.low + self.write,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    /// Elements of the active range are being merged back one per step.
    Merging(Merge),
    /// The last merge completed, the next step pops the following range.
    Scheduling(Merge),
    Done,
}

/// Top-down merge sort with the recursion replaced by a precomputed stack of pending ranges.
///
/// Every non-trivial range of the split tree is pushed once at construction, parent before its
/// right half before its left half. Popping therefore yields the ranges in the order a recursive
/// implementation finishes them: both halves of a range are merged before the range itself.
///
/// The active range is merged from two scratch buffers holding copies of its halves. The buffers
/// are owned by the engine and reused across merges, they only grow when a larger half shows up.
#[derive(Debug, Clone)]
pub struct MergeSort<T> {
    len: usize,
    pending: Vec<Range>,
    left: Vec<T>,
    right: Vec<T>,
    phase: Phase,
}

impl<T: Ord + Copy> MergeSort<T> {
    pub fn new(v: &[T]) -> Self {
        let mut this = Self {
            len: v.len(),
            pending: build_merge_stack(v.len()),
            left: Vec::new(),
            right: Vec::new(),
            phase: Phase::Done,
        };
        debug!(
            "merge sort over {} elements, {} ranges pending",
            this.len,
            this.pending.len()
        );

        this.schedule(v);
        this
    }

    /// Ranges still waiting to be merged. The last entry is merged next.
    #[inline]
    pub fn pending_ranges(&self) -> &[Range] {
        &self.pending
    }

    /// The range being merged, or just merged if the engine is between two merges.
    pub fn active_range(&self) -> Option<Range> {
        match self.phase {
            Phase::Merging(m) | Phase::Scheduling(m) => Some(m.range),
            Phase::Done => None,
        }
    }

    /// `true` between the step that finishes a merge and the step that starts the next one.
    #[inline]
    pub fn is_merge_complete(&self) -> bool {
        matches!(self.phase, Phase::Scheduling(_))
    }

    pub fn cursors(&self) -> Option<MergeCursors> {
        match self.phase {
            Phase::Merging(m) | Phase::Scheduling(m) => Some(m.cursors()),
            Phase::Done => None,
        }
    }

    /// Copies of the left and right half of the active range.
    #[inline]
    pub fn scratch(&self) -> (&[T], &[T]) {
        (&self.left, &self.right)
    }

    fn schedule(&mut self, v: &[T]) {
        match self.pending.pop() {
            Some(range) => self.begin(range, v),
            None => self.finish(),
        }
    }

    fn begin(&mut self, range: Range, v: &[T]) {
        debug_assert!(!range.is_trivial());
        let mid = range.mid();

        self.left.clear();
        self.left.extend_from_slice(&v[range.low..=mid]);
        self.right.clear();
        self.right.extend_from_slice(&v[mid + 1..=range.high]);

        trace!(
            "merging [{}, {}] at mid {}, {} ranges left",
            range.low,
            range.high,
            mid,
            self.pending.len()
        );

        self.phase = Phase::Merging(Merge {
            range,
            mid,
            a: 0,
            b: 0,
            write: 0,
        });
    }

    fn finish(&mut self) {
        debug!("merge sort done");
        self.phase = Phase::Done;
        self.left = Vec::new();
        self.right = Vec::new();
    }
}

impl<T: Ord + Copy> StepSort<T> for MergeSort<T> {
    fn step(&mut self, v: &mut [T]) {
        let mut m = match self.phase {
            Phase::Merging(m) => m,
            Phase::Scheduling(_) => {
                check_len(v, self.len);
                self.schedule(v);
                return;
            }
            Phase::Done => return,
        };
        check_len(v, self.len);

        let value = if m.a >= self.left.len() {
            m.b += 1;
            self.right[m.b - 1]
        } else if m.b >= self.right.len() {
            m.a += 1;
            self.left[m.a - 1]
        } else if self.left[m.a] <= self.right[m.b] {
            // Ties take the left element, which keeps equal elements in input order.
            m.a += 1;
            self.left[m.a - 1]
        } else {
            m.b += 1;
            self.right[m.b - 1]
        };

        v[m.range.low + m.write] = value;
        m.write += 1;

        if m.write < m.range.len() {
            self.phase = Phase::Merging(m);
        } else if self.pending.is_empty() {
            self.finish();
        } else {
            self.phase = Phase::Scheduling(m);
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
            Highlight::new(c.left, Role::Secondary),
            Highlight::new(c.right, Role::Secondary),
            Highlight::new(c.write, Role::Tertiary),
            Highlight::new(c.low, Role::Primary),
            Highlight::new(c.high, Role::Primary),
        ]
        .into_iter()
        .filter(|h| h.index < self.len)
        .collect()
    }

    fn snapshot(&self, v: &[T]) -> Vec<T> {
        let mut out = v.to_vec();

        if let Phase::Merging(m) = self.phase {
            let unconsumed = self.left[m.a..].iter().chain(&self.right[m.b..]);
            let gap = &mut out[m.range.low + m.write..=m.range.high];
            for (slot, value) in gap.iter_mut().zip(unconsumed) {
                *slot = *value;
            }
        }

        out
    }
}

/// Walks the split tree of `[0, len - 1]` in pre-order, visiting right halves first, and records
/// every range with at least two elements.
fn build_merge_stack(len: usize) -> Vec<Range> {
    // A split tree over `len` leaves has `len - 1` inner nodes.
    let mut stack = Vec::with_capacity(len.saturating_sub(1));
    let mut walk: Vec<Range> = Range::full(len).into_iter().collect();

    while let Some(range) = walk.pop() {
        if range.is_trivial() {
            continue;
        }

        stack.push(range);

        let mid = range.mid();
        walk.push(Range::new(range.low, mid));
        walk.push(Range::new(mid + 1, range.high));
    }

    stack
}
