pub mod app;
pub mod console;
pub mod routes;
pub mod views;

pub use app::{App, Flow};
pub use console::{Command, CommandError};
pub use routes::Route;
