//! Unified error handling for the buffer pool crate.
//!
//! This module defines [`BufMgrError`], the single error type propagated
//! throughout every layer of the engine — from the paged file store,
//! through the frame index, up to the buffer pool's public surface.
//!
//! A convenience [`Result<T>`] type alias is re-exported so that callers can
//! write `Result<T>` instead of `std::result::Result<T, BufMgrError>`.

use std::fmt;
use std::io;

/// The canonical error type for all buffer pool operations.
///
/// Every fallible function in the crate returns this type (via the
/// [`Result`] alias). Variants are organised by subsystem so that callers
/// can match on the error category without inspecting free-form strings.
#[derive(Debug)]
pub enum BufMgrError {
    /// An I/O error originating from the filesystem or disk layer.
    Io(io::Error),

    /// The on-disk file is corrupt or contains an unrecognised format
    /// (bad magic bytes, mismatched page size, truncated header).
    CorruptFile(String),

    /// `File::create` was asked to create a file that already exists.
    FileExists(String),

    /// `File::open` or `File::remove` was asked for a name that does not
    /// exist on disk.
    FileNotFound(String),

    /// `File::remove` was asked to remove a file that still has a live
    /// handle open.
    FileOpen(String),

    /// The requested page number is out of range, or refers to a page the
    /// file store currently considers free.
    InvalidPage(u32),

    /// The clock sweep completed without finding a frame to reclaim:
    /// every frame in the pool is pinned.
    BufferExceeded,

    /// `unPinPage` was called on a frame whose pin count is already zero.
    PageNotPinned,

    /// `flushFile` encountered a frame that is still pinned.
    PagePinned,

    /// `flushFile` encountered a frame the index still refers to, but
    /// which the pool considers invalid (not resident).
    BadBuffer,

    /// The frame index was asked to insert a `(file, page)` key that is
    /// already present.
    HashAlreadyPresent,

    /// The frame index was asked to look up or remove a `(file, page)`
    /// key that is not present.
    HashNotFound,

    /// An internal invariant was violated. This usually indicates a bug
    /// in the buffer pool itself and should be reported.
    Internal(String),
}

impl fmt::Display for BufMgrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufMgrError::Io(err) => write!(f, "I/O error: {err}"),
            BufMgrError::CorruptFile(msg) => write!(f, "corrupt file: {msg}"),
            BufMgrError::FileExists(name) => write!(f, "file already exists: {name}"),
            BufMgrError::FileNotFound(name) => write!(f, "file not found: {name}"),
            BufMgrError::FileOpen(name) => write!(f, "file is still open: {name}"),
            BufMgrError::InvalidPage(no) => write!(f, "invalid page number: {no}"),
            BufMgrError::BufferExceeded => {
                write!(f, "buffer pool exceeded: no unpinned frame available")
            }
            BufMgrError::PageNotPinned => write!(f, "page is not pinned"),
            BufMgrError::PagePinned => write!(f, "page is still pinned"),
            BufMgrError::BadBuffer => write!(f, "bad buffer: frame is not valid"),
            BufMgrError::HashAlreadyPresent => write!(f, "hash table entry already present"),
            BufMgrError::HashNotFound => write!(f, "hash table entry not found"),
            BufMgrError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for BufMgrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufMgrError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for BufMgrError {
    fn from(err: io::Error) -> Self {
        BufMgrError::Io(err)
    }
}

/// A specialised [`Result`] type for buffer pool operations.
///
/// This is defined as a convenience so that every function in the crate
/// can simply return `Result<T>` rather than spelling out the full
/// `std::result::Result<T, BufMgrError>`.
pub type Result<T> = std::result::Result<T, BufMgrError>;
