//! APIs listing the banks known to Iamport.

mod api;

pub use api::*;
