pub mod health;
pub mod pdf;

pub use health::health_check;
pub use pdf::{generate, index, root};
