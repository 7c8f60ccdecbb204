mod constants;
mod food;
mod score;
mod session;
mod snake;

pub mod util;

pub use constants::*;
pub use food::*;
pub use score::*;
pub use session::*;
pub use snake::*;
pub use util::PseudoRandom;
