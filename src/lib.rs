// Re-export public API
pub use logreg_core::*;
pub use logreg_models::*;
