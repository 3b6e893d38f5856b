pub mod base;
pub mod clock;
pub mod environment;
pub mod identity;

pub use base::*;
pub use clock::*;
pub use environment::*;
pub use identity::*;
