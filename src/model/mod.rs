//! Types that represent the core data model, such as `Record` and `Store`.
mod amount;
mod record;
mod store;

pub use amount::{Amount, AmountError};
pub use record::{Record, DATE_FORMAT};
pub use store::Store;
