//! Kanim container constants.

/// Magic of the build stream
pub const BUILD_MAGIC: &str = "BILD";

/// Magic of the anim stream
pub const ANIM_MAGIC: &str = "ANIM";

/// Size of the magic in bytes
pub const MAGIC_SIZE: usize = 4;

/// First build version that stores a per-symbol path hash
pub const BUILD_PATH_MIN_VERSION: i32 = 10;

/// Version stamped on builds produced from SCML projects
pub const DEFAULT_BUILD_VERSION: i32 = 10;

/// Version stamped on anims produced from SCML projects
pub const DEFAULT_ANIM_VERSION: i32 = 5;

/// Payload bits carried by each variable-length integer byte
pub const VARINT_PAYLOAD_BITS: u32 = 7;

/// Continuation flag of a variable-length integer byte
pub const VARINT_CONTINUE: u8 = 0x80;

/// Mask of the payload bits of a variable-length integer byte
pub const VARINT_MASK: u8 = 0x7F;
