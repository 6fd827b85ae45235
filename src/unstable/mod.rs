// Scan-and-swap selection sort, one comparison or swap per step.
pub mod step_selection;

// First-element pivot quicksort with an explicit stack of pending ranges.
pub mod step_quicksort;
