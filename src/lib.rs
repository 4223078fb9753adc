pub mod address;
pub mod config;
pub mod error;
pub mod zone;

pub use error::{Result, ZoneGenError};
pub use zone::{Host, MailExchanger, Zone, ZoneFileWriter};
