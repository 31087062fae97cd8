pub mod dataset;
pub mod lookup;

pub use dataset::{generate, read_dataset, write_dataset, Approach, MoonDataPoint, Phase};
pub use lookup::{parse_query, LookupError, MoonIndex};
