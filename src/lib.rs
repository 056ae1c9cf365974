// Third-person orbit camera rig.
// See engine/mod.rs for the module layout.

pub mod engine;
pub mod error;

pub use error::RigError;
