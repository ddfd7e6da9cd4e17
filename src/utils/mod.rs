pub mod clock;
pub mod logging;
pub mod time;
pub mod week;
