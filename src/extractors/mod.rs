pub mod svtplay;

pub use svtplay::{parse_embed_page, SvtPlayExtractor};
