pub mod authority;
pub mod blocks;
pub mod parser;

pub use authority::{normalize_phrase, AuthorityTable};
pub use blocks::EntryBlock;
pub use parser::{parse, parse_file};
