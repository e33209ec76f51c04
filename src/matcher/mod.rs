pub mod index;
pub mod suggest;

pub use index::{IndexEntry, SemanticIndex};
pub use suggest::{TermMatch, TermSuggester};
