//! Constants used throughout the Shutter library.
//!
//! This module provides central definitions for the persisted session layout:
//! the key names inside one session entry and the values with reserved meaning.

/// Session key holding the `login` flag. Only the boolean `true` counts as logged in.
pub const LOGIN: &str = "login";

/// Session key holding the numeric identity of the logged in caller.
pub const USER_ID: &str = "user_id";

/// Key under which earlier gallery releases stored the caller's identity.
///
/// Read when [`USER_ID`] is absent and removed on the next identity write.
pub const LEGACY_USER_ID: &str = "UserID";

/// Session key holding the album visibility allowlist.
pub const VISIBLE_ALBUMS: &str = "visible_albums";

/// Persisted `user_id` reserved for the administrator, which has no user record.
pub const ADMIN_SENTINEL: u64 = 0;

/// Separator of the legacy string encoding of the visibility allowlist.
pub const LEGACY_ALBUM_SEPARATOR: char = '|';
