/// Transaction domain: typed records, mapping from Plaid, summary.
pub mod mapping;
pub mod model;

pub use mapping::from_plaid;
pub use model::{Status, Summary, Transaction};
