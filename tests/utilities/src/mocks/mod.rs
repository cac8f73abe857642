pub mod cosmos_wallet;
pub mod middleware;
pub mod router;
