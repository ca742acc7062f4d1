//! # pagepool
//!
//! A single-threaded buffer pool manager: a fixed-size, clock-sweep page
//! cache sitting on top of a paged file store.
//!
//! ```
//! use pagepool::{BufferPool, File};
//!
//! # fn main() -> pagepool::Result<()> {
//! # let dir = tempfile::TempDir::new().unwrap();
//! # let path = dir.path().join("example.db");
//! let file = File::create(&path)?;
//! let pool = BufferPool::new(64)?;
//!
//! let (page_no, mut view) = pool.alloc_page(&file)?;
//! view.data_mut()[0] = 42;
//! drop(view);
//!
//! pool.flush_file(&file)?;
//!
//! let view = pool.read_page(&file, page_no)?;
//! assert_eq!(view.data()[0], 42);
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod error;
pub mod file;
pub mod index;

pub use buffer::{BufStats, BufferPool, PageView, PageViewMut};
pub use error::{BufMgrError, Result};
pub use file::{File, PageId, DATA_SIZE};
