//! One active engine at a time, selected at runtime.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SortError;
use crate::stable::step_insertion::InsertionSort;
use crate::stable::step_merge::MergeSort;
use crate::step::{Highlight, StepSort};
use crate::unstable::step_quicksort::QuickSort;
use crate::unstable::step_selection::SelectionSort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
        }
    }

    /// Number keys `1` to `4` pick the algorithms in [`Algorithm::ALL`] order.
    pub fn from_digit(key: char) -> Option<Self> {
        let idx = key.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(idx as usize).copied()
    }

    /// Whether equal elements keep their input order.
    pub const fn is_stable(self) -> bool {
        matches!(self, Algorithm::Insertion | Algorithm::Merge)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selection" => Ok(Algorithm::Selection),
            "insertion" | "insert" => Ok(Algorithm::Insertion),
            "merge" => Ok(Algorithm::Merge),
            "quick" | "quicksort" => Ok(Algorithm::Quick),
            _ => Err(SortError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Closed set of engines, so a host can hold whichever one is active in a single field.
#[derive(Debug, Clone)]
pub enum AnyEngine<T> {
    Selection(SelectionSort),
    Insertion(InsertionSort<T>),
    Merge(MergeSort<T>),
    Quick(QuickSort<T>),
}

impl<T: Ord + Copy> AnyEngine<T> {
    pub fn new(algorithm: Algorithm, v: &[T]) -> Self {
        match algorithm {
            Algorithm::Selection => AnyEngine::Selection(SelectionSort::new(v)),
            Algorithm::Insertion => AnyEngine::Insertion(InsertionSort::new(v)),
            Algorithm::Merge => AnyEngine::Merge(MergeSort::new(v)),
            Algorithm::Quick => AnyEngine::Quick(QuickSort::new(v)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            AnyEngine::Selection(_) => Algorithm::Selection,
            AnyEngine::Insertion(_) => Algorithm::Insertion,
            AnyEngine::Merge(_) => Algorithm::Merge,
            AnyEngine::Quick(_) => Algorithm::Quick,
        }
    }
}

impl<T: Ord + Copy> StepSort<T> for AnyEngine<T> {
    fn step(&mut self, v: &mut [T]) {
        match self {
            AnyEngine::Selection(e) => e.step(v),
            AnyEngine::Insertion(e) => e.step(v),
            AnyEngine::Merge(e) => e.step(v),
            AnyEngine::Quick(e) => e.step(v),
        }
    }

    fn is_done(&self) -> bool {
        match self {
            AnyEngine::Selection(e) => e.is_done(),
            AnyEngine::Insertion(e) => e.is_done(),
            AnyEngine::Merge(e) => e.is_done(),
            AnyEngine::Quick(e) => e.is_done(),
        }
    }

    fn highlights(&self) -> Vec<Highlight> {
        match self {
            AnyEngine::Selection(e) => StepSort::<T>::highlights(e),
            AnyEngine::Insertion(e) => e.highlights(),
            AnyEngine::Merge(e) => e.highlights(),
            AnyEngine::Quick(e) => e.highlights(),
        }
    }

    fn snapshot(&self, v: &[T]) -> Vec<T> {
        match self {
            AnyEngine::Selection(e) => e.snapshot(v),
            AnyEngine::Insertion(e) => e.snapshot(v),
            AnyEngine::Merge(e) => e.snapshot(v),
            AnyEngine::Quick(e) => e.snapshot(v),
        }
    }
}
