mod error;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::reminder::dtos::*;
}

pub use crate::error::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
