pub mod record;
pub mod import;
pub mod export;

pub use record::{field_values, Record};
pub use import::{load_series, parse_series};
pub use export::write_json;
