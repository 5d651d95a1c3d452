pub mod connect;
pub mod driver;
pub mod itunes;
pub mod keywords;
pub mod logging;
pub mod render;
pub mod types;

pub use types::Platform;
