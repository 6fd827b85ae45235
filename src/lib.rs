//! Resumable sorting engines that advance one comparison, move or swap per call.
//!
//! Every engine follows the same shape: build it from the buffer it will sort, call
//! [`StepSort::step`] until [`StepSort::is_done`] reports completion, and inspect the cursors in
//! between to observe each intermediate configuration of the array.

/// Implements [`Sort`] for the run-to-completion `sort` function of the calling module.
macro_rules! sort_impl {
    ($name:expr) => {
        pub struct SortImpl;

        impl crate::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort<T>(arr: &mut [T])
            where
                T: Ord + Copy,
            {
                sort(arr);
            }
        }
    };
}

pub mod engine;
pub mod error;
pub mod player;
pub mod range;
pub mod stable;
pub mod step;
pub mod unstable;

pub use engine::{Algorithm, AnyEngine};
pub use error::SortError;
pub use player::{Command, Frame, Player, PlayerConfig};
pub use range::Range;
pub use step::{Highlight, Role, StepSort, Stepper};

/// Uniform run-to-completion interface over the step engines, used by tests and benchmarks.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Copy;
}

/// Returns `true` if `v` is non-decreasing.
#[inline]
pub fn is_sorted<T: Ord>(v: &[T]) -> bool {
    v.windows(2).all(|w| w[0] <= w[1])
}
