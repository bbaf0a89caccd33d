//! jforest XML ensemble format.
//!
//! An ensemble document holds any number of `Tree` elements. Each tree carries five
//! whitespace-separated token lists:
//!
//! | Element | Content |
//! |---|---|
//! | `SplitFeatures` | feature id per internal node |
//! | `OriginalThresholds` | split threshold per internal node |
//! | `LeafOutputs` | output value per leaf |
//! | `LeftChildren` / `RightChildren` | sign-encoded child per internal node |
//!
//! Feature ids, thresholds and leaf outputs are kept as the original text so that
//! converted output reproduces them exactly.

mod xml;

pub use xml::{Ensemble, RawTree};
