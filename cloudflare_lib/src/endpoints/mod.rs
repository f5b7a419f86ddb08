//! Resource endpoints. Each is a thin caller over the client and the
//! pagination engine.

mod buckets;
mod dns;
mod zones;
