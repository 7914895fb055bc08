//! Structure inference: from raw spans to a title and heading outline.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. [`TextNormalizer`] cleans, repairs, filters and merges spans into blocks
//! 2. [`FontStatistics`] derives the body-size baseline
//! 3. [`HeadingClassifier`] assigns each block a role
//! 4. [`OutlineBuilder`] deduplicates and orders the headings
//! 5. [`TitleSelector`] picks the title
//!
//! [`OutlineExtractor`] drives all of it.

mod classify;
mod cues;
mod fonts;
mod noise;
mod normalize;
mod options;
mod outline;
mod pipeline;
mod repair;
mod title;

pub use classify::HeadingClassifier;
pub use cues::{CueRule, CueSet};
pub use fonts::{FontProfile, FontStatistics};
pub use noise::NoiseFilter;
pub use normalize::TextNormalizer;
pub use options::{FixedThresholds, HeadingStrategy, OutlineOptions, OutlineOrder};
pub use outline::{sort_outline, OutlineBuilder};
pub use pipeline::OutlineExtractor;
pub use repair::{clean_text, is_corrupted, normalize_text, repair};
pub use title::{TitleCandidate, TitleSelector};
