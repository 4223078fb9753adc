pub mod host;
pub mod writer;
#[allow(clippy::module_inception)]
pub mod zone;

pub use host::{Host, MailExchanger};
pub use writer::{ZoneFileWriter, format_record, is_absolute_domain_name, serial_for_date};
pub use zone::Zone;

/// Zone file constants
pub mod constants {
    /// Width of the owner column
    pub const LEFT_COLUMN_WIDTH: usize = 31;

    /// Width of the record type column ("IN CNAME", ...)
    pub const MID_COLUMN_WIDTH: usize = 10;

    /// Width of the SOA timer values
    pub const SOA_TIMER_WIDTH: usize = 8;

    pub const DEFAULT_TTL: &str = "1D";
    pub const DEFAULT_REFRESH: &str = "2H";
    pub const DEFAULT_RETRY: &str = "5M";
    pub const DEFAULT_EXPIRE: &str = "1W";
    pub const DEFAULT_NEGATIVE_CACHE_TTL: &str = "1M";
}
