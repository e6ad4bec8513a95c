pub mod model;
pub mod routes;
pub mod service;

pub use model::{Comparison, TranslationRequest};
pub use routes::routes;
pub use service::compare;
