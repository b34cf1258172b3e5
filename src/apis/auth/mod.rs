//! Models related to authentication against the Iamport APIs.

mod model;

pub use model::*;
