mod utilities;

pub mod mocks;

pub use utilities::{setup_tracing, Account, ACCOUNT1, ACCOUNT2};
