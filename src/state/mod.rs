//! Application state module

mod form;
mod progress;
mod step;
mod wizard;

pub use form::*;
pub use progress::*;
pub use step::*;
pub use wizard::*;
