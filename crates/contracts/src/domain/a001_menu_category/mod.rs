pub mod aggregate;
pub mod normalizer;
pub mod parser;
pub mod price;

pub use aggregate::{ItemEntryMode, ParsedCategory, ParsedMenuItem, RawCategory, RawItem};
pub use normalizer::{normalize, slugify};
pub use parser::parse_items;
pub use price::{is_price, split_trailing_price};
