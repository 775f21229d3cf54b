pub mod aggregate;
pub mod builder;
pub mod engine;
pub mod error;
pub mod fees;
pub mod notify;
pub mod partition;
pub mod resolver;
pub mod writer;

pub use engine::{CheckoutEngine, CheckoutPolicy};
pub use error::CheckoutError;
pub use notify::RetryPolicy;
