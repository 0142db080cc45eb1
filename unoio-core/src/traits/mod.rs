//! Device capability traits
//!
//! These traits are the only thing the choreography and application code
//! knows about a device. Concrete devices live in `unoio-drivers`.

pub mod input;
pub mod output;

pub use input::DigitalInput;
pub use output::DigitalOutput;
