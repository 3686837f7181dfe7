//! Entity models: `FromRow` structs mirroring table rows plus `Create*`
//! DTOs for inserts.

pub mod like;
pub mod session;
pub mod user;
pub mod video;
