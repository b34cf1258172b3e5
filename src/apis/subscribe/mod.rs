//! APIs and models related to billing keys and recurring payments.

mod api;
mod model;

pub use api::*;
pub use model::*;
