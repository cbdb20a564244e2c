pub mod config;
pub mod event;
pub mod keyboard;
pub mod run;

pub use config::*;
pub use event::*;
pub use keyboard::*;
pub use run::*;
