mod common;
pub(crate) use self::common::append_pairs;
pub use self::common::{CursorQuery, PageQuery, Query, SortDirection};

mod zone;
pub use self::zone::{ZoneOrder, ZoneQuery};

mod dns;
pub use self::dns::DnsRecordQuery;
