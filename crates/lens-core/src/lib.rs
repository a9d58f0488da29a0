pub mod constants;
pub mod coords;
pub mod error;
pub mod lens;
pub mod rays;
pub mod session;
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

pub use constants::*;
pub use coords::*;
pub use error::ConfigError;
pub use lens::*;
pub use rays::*;
pub use session::*;
