#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod window;

pub use ids::{GroupId, LemmaId};
pub use window::WindowShape;

pub mod model;
pub use model::*;
