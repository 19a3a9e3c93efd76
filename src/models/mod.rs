pub mod common;
pub mod params;
pub mod request;
pub mod response;
pub mod settings;

pub use common::*;
pub use params::*;
pub use request::*;
pub use response::*;
pub use settings::*;
