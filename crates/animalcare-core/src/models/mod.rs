//! Domain models for the veterinary clinic system.

mod account;
mod catalog;
mod consultation;
mod pet;

pub use account::*;
pub use catalog::*;
pub use consultation::*;
pub use pet::*;
