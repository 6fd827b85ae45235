// Shift-and-place insertion sort, one shift or placement per step.
pub mod step_insertion;

// Top-down merge sort driven by a precomputed stack of pending ranges.
pub mod step_merge;
