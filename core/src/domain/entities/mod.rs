//! Domain entities representing core business objects.

pub mod account;

pub use account::{Account, AccountField};
