pub mod car;
pub mod errors;
pub mod pricing;
pub mod schema;
pub mod validation;
