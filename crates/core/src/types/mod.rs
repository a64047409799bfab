pub mod big;
pub mod declared;
pub mod enums;

pub use big::*;
pub use declared::*;
pub use enums::*;
