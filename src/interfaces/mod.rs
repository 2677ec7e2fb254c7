pub mod design_system;
pub mod price_form;

pub use price_form::{APP_TITLE, LoadFailureApp, PriceFormApp};
