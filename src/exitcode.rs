//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error (bad position, rejected tree operation)
pub const USAGE: i32 = 64;

/// Data format error (malformed or unsupported bookmarks file)
pub const DATAERR: i32 = 65;

/// Lookup found nothing
pub const NOINPUT: i32 = 66;

/// Can't create output file
pub const CANTCREAT: i32 = 73;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
