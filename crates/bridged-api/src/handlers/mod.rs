//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod affiliate_codes;
pub mod campaigns;
pub mod health;
pub mod partnerships;
pub mod users;
