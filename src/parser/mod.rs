pub mod assembler;
pub mod classifier;
pub mod normalize;
pub mod sectionizer;

pub use assembler::{split_clauses, Mode, RequirementExtractor};
pub use classifier::Classifier;
pub use normalize::{normalize, strip_list_marker, to_check_text};
pub use sectionizer::{Heading, ScopeChange, Sectionizer};
