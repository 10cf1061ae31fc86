//! The four independent pattern detectors and their shared output types.

pub mod cycle;
pub mod degree;
pub mod shell;
pub mod smurfing;
pub mod velocity;

pub use cycle::{Cycle, CycleOutput};
pub use degree::DegreeFlag;
pub use shell::ShellChain;
pub use smurfing::{FanRing, FanRingKind};
pub use velocity::VelocityFlag;
