mod envelope;
pub use self::envelope::{ApiError, ApiMessage, CursorInfo, Envelope, PageInfo};

mod zone;
pub use self::zone::{AccountRef, Zone, ZoneID, ZoneStatus, ZoneType};

mod dns;
pub use self::dns::{DeletedRecord, DnsRecord, DnsRecordType};

mod bucket;
pub use self::bucket::{Bucket, BucketList, StorageClass};
