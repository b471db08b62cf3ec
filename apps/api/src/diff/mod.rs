// Version diff engine: word-level LCS differ, per-section aggregation and
// change summaries. Pure functions, no I/O.

pub mod sections;
pub mod summary;
pub mod word_diff;
