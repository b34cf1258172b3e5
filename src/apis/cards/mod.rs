//! APIs listing the card issuers known to Iamport.

mod api;

pub use api::*;
