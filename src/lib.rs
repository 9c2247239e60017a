mod common;
pub use self::common::*;
mod corpus;
pub use self::corpus::Corpus;
mod error;
pub use self::error::{Error, Result};

pub mod crawl;
pub use self::crawl::crawl;
pub mod page_rank;
