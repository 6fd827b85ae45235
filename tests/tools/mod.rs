#![allow(dead_code)]

use std::collections::HashMap;

use rand::prelude::*;
use rand::rngs::StdRng;
use zipf::ZipfDistribution;

use step_sort_rs::{Highlight, StepSort, Stepper};

pub const TEST_SIZES: [usize; 20] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 15, 16, 17, 20, 31, 32, 33, 50, 64, 100,
];

// --- Patterns ---

fn rng_for(len: usize, salt: u64) -> StdRng {
    StdRng::seed_from_u64((len as u64) << 8 ^ salt)
}

pub fn random(len: usize) -> Vec<i32> {
    let mut rng = rng_for(len, 1);
    (0..len).map(|_| rng.gen()).collect()
}

pub fn random_uniform(len: usize, range: std::ops::RangeInclusive<i32>) -> Vec<i32> {
    let mut rng = rng_for(len, 2);
    (0..len).map(|_| rng.gen_range(range.clone())).collect()
}

/// Many duplicates, few distinct values dominate.
pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    let mut rng = rng_for(len, 3);
    let dist = ZipfDistribution::new(len.max(1), exponent).expect("valid zipf parameters");
    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn random_binary(len: usize) -> Vec<i32> {
    random_uniform(len, 0..=1)
}

pub fn ascending(len: usize) -> Vec<i32> {
    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    (0..len as i32).rev().collect()
}

pub fn all_equal(len: usize) -> Vec<i32> {
    vec![66; len]
}

/// Ascending runs of `tooth` elements.
pub fn saw_ascending(len: usize, tooth: usize) -> Vec<i32> {
    (0..len).map(|i| (i % tooth.max(1)) as i32).collect()
}

pub fn saw_descending(len: usize, tooth: usize) -> Vec<i32> {
    (0..len)
        .map(|i| (tooth.max(1) - i % tooth.max(1)) as i32)
        .collect()
}

pub fn patterns(len: usize) -> Vec<(&'static str, Vec<i32>)> {
    vec![
        ("random", random(len)),
        ("random_d20", random_uniform(len, 0..=20)),
        ("random_zipf", random_zipf(len, 1.0)),
        ("random_binary", random_binary(len)),
        ("ascending", ascending(len)),
        ("descending", descending(len)),
        ("all_equal", all_equal(len)),
        ("saw_ascending", saw_ascending(len, 5)),
        ("saw_descending", saw_descending(len, 7)),
    ]
}

// --- Helpers ---

pub fn sorted_copy(v: &[i32]) -> Vec<i32> {
    let mut out = v.to_vec();
    out.sort();
    out
}

pub fn multiset(v: &[i32]) -> HashMap<i32, usize> {
    let mut counts = HashMap::new();
    for &x in v {
        *counts.entry(x).or_insert(0) += 1;
    }
    counts
}

/// Smallest `k` with `2^k >= n`.
pub fn ceil_log2(n: usize) -> usize {
    n.next_power_of_two().trailing_zeros() as usize
}

pub fn quadratic_bound(n: usize) -> usize {
    n * n + 1
}

pub fn n_log_n_bound(n: usize) -> usize {
    n * (ceil_log2(n) + 1) + 1
}

// First-element pivots make sorted input quadratic, each partition costs at most three steps per
// element.
pub fn quicksort_bound(n: usize) -> usize {
    2 * n * n + 2 * n + 1
}

/// Everything observable between two steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub data: Vec<i32>,
    pub highlights: Vec<Highlight>,
    pub done: bool,
}

pub fn observe_run<E, F>(input: &[i32], init: F) -> Vec<Observation>
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    let mut v = input.to_vec();
    let mut stepper = Stepper::new(&mut v, init);
    let mut trace = Vec::new();

    loop {
        trace.push(Observation {
            data: stepper.as_slice().to_vec(),
            highlights: stepper.highlights(),
            done: stepper.is_done(),
        });
        if !stepper.step() {
            break;
        }
    }

    trace
}

// --- Property checks stamped out per engine ---

pub fn check_boundary_sizes<E, F>(init: F)
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    for input in [vec![], vec![42]] {
        let mut v = input.clone();
        let mut engine = init(v.as_slice());
        assert!(engine.is_done(), "len {} must start out done", input.len());

        engine.step(&mut v);
        assert!(engine.is_done());
        assert_eq!(v, input);
    }
}

pub fn check_two_elements<E, F>(init: F)
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    for input in [[2, 1], [1, 2], [7, 7]] {
        let mut v = input;
        let mut stepper = Stepper::new(&mut v, &init);
        stepper.run();
        assert_eq!(stepper.as_slice(), sorted_copy(&input).as_slice());
    }
}

pub fn check_sorts_patterns<E, F>(init: F)
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    for len in TEST_SIZES {
        for (name, input) in patterns(len) {
            let mut v = input.clone();
            let mut stepper = Stepper::new(&mut v, &init);
            stepper.run();

            assert!(stepper.is_done());
            assert_eq!(
                stepper.as_slice(),
                sorted_copy(&input).as_slice(),
                "pattern {name} len {len}"
            );
        }
    }
}

/// The logical contents are a permutation of the input after every single step. With
/// `raw_buffer_too` the same is asserted for the buffer itself.
pub fn check_permutation_every_step<E, F>(init: F, raw_buffer_too: bool)
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    for len in [2, 3, 5, 8, 13, 21, 40] {
        for input in [random_uniform(len, 0..=9), descending(len), random(len)] {
            let expected = multiset(&input);
            let mut v = input.clone();
            let mut stepper = Stepper::new(&mut v, &init);

            while stepper.step() {
                assert_eq!(
                    multiset(&stepper.snapshot()),
                    expected,
                    "snapshot lost an element after step {} (len {len})",
                    stepper.steps()
                );
                if raw_buffer_too {
                    assert_eq!(multiset(stepper.as_slice()), expected);
                }
            }

            // Nothing is held outside the buffer once done.
            assert_eq!(stepper.snapshot(), stepper.as_slice());
        }
    }
}

pub fn check_deterministic<E, F>(init: F)
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    for len in [0, 1, 2, 10, 33] {
        let input = random_uniform(len, -50..=50);
        let first = observe_run(&input, &init);
        let second = observe_run(&input, &init);
        assert_eq!(first, second, "len {len}");
    }
}

pub fn check_step_bound<E, F>(init: F, bound: fn(usize) -> usize)
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    for len in [2, 3, 10, 31, 50, 64] {
        for (name, input) in patterns(len) {
            let mut v = input.clone();
            let steps = Stepper::new(&mut v, &init).run();
            assert!(
                steps <= bound(len),
                "pattern {name} len {len} took {steps} steps, bound {}",
                bound(len)
            );
        }
    }

    // Worst case for first-element pivots.
    let mut v = ascending(50);
    let steps = Stepper::new(&mut v, &init).run();
    assert!(steps <= bound(50));
    assert_eq!(v, ascending(50));
}

pub fn check_step_after_done_is_noop<E, F>(init: F)
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    let mut v = random_uniform(17, 0..=5);
    let mut engine = init(v.as_slice());
    while !engine.is_done() {
        engine.step(&mut v);
    }

    let data = v.clone();
    let highlights = engine.highlights();
    for _ in 0..3 {
        engine.step(&mut v);
        assert!(engine.is_done());
        assert_eq!(v, data);
        assert_eq!(engine.highlights(), highlights);
    }
}

pub fn check_highlights_in_bounds<E, F>(init: F)
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    for len in [2, 7, 16] {
        for observation in observe_run(&random(len), &init) {
            assert!(observation.highlights.iter().all(|h| h.index < len));
        }
    }
}

pub fn step_with_wrong_length<E, F>(init: F)
where
    E: StepSort<i32>,
    F: Fn(&[i32]) -> E,
{
    let v = [4, 3, 2, 1];
    let mut engine = init(&v[..]);
    let mut shorter = [4, 3, 2];
    engine.step(&mut shorter);
}

/// Stamps out the property suite for one engine. `$init` builds the engine from a buffer and
/// `$bound` caps the number of steps for a given length.
macro_rules! instantiate_step_tests {
    ($prefix:ident, $init:expr, $bound:expr, raw_permutation = $raw:expr) => {
        paste::paste! {
            #[test]
            fn [<$prefix _boundary_sizes>]() {
                tools::check_boundary_sizes($init);
            }

            #[test]
            fn [<$prefix _two_elements>]() {
                tools::check_two_elements($init);
            }

            #[test]
            fn [<$prefix _sorts_patterns>]() {
                tools::check_sorts_patterns($init);
            }

            #[test]
            fn [<$prefix _permutation_every_step>]() {
                tools::check_permutation_every_step($init, $raw);
            }

            #[test]
            fn [<$prefix _deterministic>]() {
                tools::check_deterministic($init);
            }

            #[test]
            fn [<$prefix _step_bound>]() {
                tools::check_step_bound($init, $bound);
            }

            #[test]
            fn [<$prefix _step_after_done_is_noop>]() {
                tools::check_step_after_done_is_noop($init);
            }

            #[test]
            fn [<$prefix _highlights_in_bounds>]() {
                tools::check_highlights_in_bounds($init);
            }

            #[test]
            #[should_panic(expected = "buffer length changed")]
            fn [<$prefix _wrong_length_panics>]() {
                tools::step_with_wrong_length($init);
            }
        }
    };
}

pub(crate) use instantiate_step_tests;
