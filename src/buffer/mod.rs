//! # Buffer Pool
//!
//! The buffer pool is the in-memory page cache sitting on top of the
//! [paged file store](crate::file). It owns a fixed number of frames, a
//! clock-sweep replacement policy, and the [`FrameIndex`](crate::index)
//! mapping resident `(file, page)` pairs to frames.
//!
//! All page access from outside this module goes through
//! [`view::PageView`]/[`view::PageViewMut`], scoped handles that guarantee
//! exactly one unpin on drop. The pool itself is single-threaded: its
//! mutable state lives behind one `RefCell` so every method takes `&self`,
//! which is what lets a view hold a live reference to the pool across its
//! own lifetime. See `DESIGN.md` for why this is the one place this crate
//! departs from `&mut self`.

pub mod view;

use std::cell::{Ref, RefCell, RefMut};

use crate::error::{BufMgrError, Result};
use crate::file::{File, Page, PageId, DATA_SIZE, INVALID_NUMBER};
use crate::index::FrameIndex;

pub use view::{PageView, PageViewMut};

/// Running counters for diagnostic/benchmark use, mirroring the original
/// `getBufStats`/`clearBufStats` pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct BufStats {
    /// Number of `read_page`/`read_page_mut` calls, hit or miss.
    pub accesses: u64,
    /// Number of pages read from a file store to satisfy a miss.
    pub diskreads: u64,
    /// Number of dirty frames written back to a file store.
    pub diskwrites: u64,
}

struct Frame {
    valid: bool,
    file: Option<File>,
    page_no: PageId,
    data: Box<[u8; DATA_SIZE]>,
    pin_count: i64,
    dirty: bool,
    refbit: bool,
}

impl Frame {
    fn empty() -> Self {
        Frame {
            valid: false,
            file: None,
            page_no: INVALID_NUMBER,
            data: Box::new([0u8; DATA_SIZE]),
            pin_count: 0,
            dirty: false,
            refbit: false,
        }
    }
}

struct PoolInner {
    frames: Vec<Frame>,
    index: FrameIndex,
    clock_hand: usize,
    stats: BufStats,
}

/// A fixed-size, single-threaded, clock-sweep page cache.
pub struct BufferPool {
    inner: RefCell<PoolInner>,
    num_bufs: usize,
}

impl BufferPool {
    /// Build a pool with `num_bufs` frames. Fails with
    /// [`BufMgrError::Internal`] if `num_bufs` is zero.
    pub fn new(num_bufs: usize) -> Result<Self> {
        if num_bufs == 0 {
            return Err(BufMgrError::Internal(
                "buffer pool must have at least one frame".into(),
            ));
        }

        let frames = (0..num_bufs).map(|_| Frame::empty()).collect();
        let inner = PoolInner {
            frames,
            index: FrameIndex::new(num_bufs),
            clock_hand: num_bufs - 1,
            stats: BufStats::default(),
        };

        Ok(BufferPool {
            inner: RefCell::new(inner),
            num_bufs,
        })
    }

    /// Number of frames this pool was constructed with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.num_bufs
    }

    /// Run the clock sweep to find (or vacate) a frame.
    ///
    /// Advances the hand at most `2 * num_bufs` steps: empty frames return
    /// immediately; pinned frames are skipped; a set reference bit is
    /// cleared and the frame skipped; an unset reference bit on an
    /// unpinned frame is the victim (written back first if dirty).
    fn alloc_frame(&self, inner: &mut PoolInner) -> Result<usize> {
        let limit = 2 * self.num_bufs;
        for _ in 0..limit {
            inner.clock_hand = (inner.clock_hand + 1) % self.num_bufs;
            let i = inner.clock_hand;

            if !inner.frames[i].valid {
                return Ok(i);
            }
            if inner.frames[i].pin_count > 0 {
                continue;
            }
            if inner.frames[i].refbit {
                inner.frames[i].refbit = false;
                continue;
            }

            if inner.frames[i].dirty {
                let file = inner.frames[i].file.clone().ok_or_else(|| {
                    BufMgrError::Internal("valid frame missing owning file".into())
                })?;
                let page = Page::from_parts(inner.frames[i].page_no, inner.frames[i].data.clone());
                file.write_page(&page)?;
                inner.stats.diskwrites += 1;
            }

            let key = (
                inner.frames[i]
                    .file
                    .as_ref()
                    .ok_or_else(|| BufMgrError::Internal("valid frame missing owning file".into()))?
                    .id(),
                inner.frames[i].page_no,
            );
            inner.index.remove(key)?;
            inner.frames[i] = Frame::empty();
            return Ok(i);
        }
        Err(BufMgrError::BufferExceeded)
    }

    /// Pin `(file, page_no)`, reading it from disk on a miss, and return
    /// the frame now holding it. Shared by `read_page`/`read_page_mut`.
    fn fetch_frame(&self, file: &File, page_no: PageId) -> Result<usize> {
        let mut inner = self.inner.borrow_mut();
        inner.stats.accesses += 1;
        let key = (file.id(), page_no);

        if let Ok(frame_no) = inner.index.lookup(key) {
            inner.frames[frame_no].refbit = true;
            inner.frames[frame_no].pin_count += 1;
            return Ok(frame_no);
        }

        let frame_no = self.alloc_frame(&mut inner)?;
        let page = file.read_page(page_no)?;
        inner.stats.diskreads += 1;
        inner.frames[frame_no] = Frame {
            valid: true,
            file: Some(file.clone()),
            page_no,
            data: page.into_data(),
            pin_count: 1,
            dirty: false,
            refbit: true,
        };
        inner.index.insert(key, frame_no)?;
        Ok(frame_no)
    }

    /// Pin and return a read-only view over `(file, page_no)`.
    pub fn read_page<'a>(&'a self, file: &File, page_no: PageId) -> Result<PageView<'a>> {
        let frame_no = self.fetch_frame(file, page_no)?;
        Ok(PageView::new(self, file.clone(), page_no, frame_no))
    }

    /// Pin and return a mutable view over an already-resident `(file,
    /// page_no)`. Use [`BufferPool::alloc_page`] to create a brand-new
    /// page instead.
    pub fn read_page_mut<'a>(&'a self, file: &File, page_no: PageId) -> Result<PageViewMut<'a>> {
        let frame_no = self.fetch_frame(file, page_no)?;
        Ok(PageViewMut::new(self, file.clone(), page_no, frame_no))
    }

    /// Allocate a fresh page in `file` and return a mutable view over it.
    pub fn alloc_page<'a>(&'a self, file: &File) -> Result<(PageId, PageViewMut<'a>)> {
        let mut inner = self.inner.borrow_mut();
        let frame_no = self.alloc_frame(&mut inner)?;

        let page = file.allocate_page()?;
        let page_no = page.page_number();
        inner.frames[frame_no] = Frame {
            valid: true,
            file: Some(file.clone()),
            page_no,
            data: page.into_data(),
            pin_count: 1,
            dirty: false,
            refbit: true,
        };
        inner.index.insert((file.id(), page_no), frame_no)?;
        drop(inner);
        Ok((
            page_no,
            PageViewMut::new(self, file.clone(), page_no, frame_no),
        ))
    }

    /// Unpin `(file, page_no)`, marking it dirty if `dirty` is true.
    ///
    /// Reserved for the scoped view types' `Drop` impls; external callers
    /// should let a view go out of scope instead of calling this directly.
    pub(crate) fn un_pin_page(&self, file: &File, page_no: PageId, dirty: bool) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let frame_no = inner.index.lookup((file.id(), page_no))?;
        if inner.frames[frame_no].pin_count <= 0 {
            return Err(BufMgrError::PageNotPinned);
        }
        inner.frames[frame_no].pin_count -= 1;
        if dirty {
            inner.frames[frame_no].dirty = true;
        }
        Ok(())
    }

    /// Flush every resident, unpinned page belonging to `file`, then clear
    /// those frames. Fails with [`BufMgrError::PagePinned`] if any frame
    /// belonging to `file` is still pinned.
    pub fn flush_file(&self, file: &File) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let fid = file.id();

        for i in 0..self.num_bufs {
            let belongs = inner.frames[i].file.as_ref().map(File::id) == Some(fid);
            if !belongs {
                continue;
            }
            if !inner.frames[i].valid {
                return Err(BufMgrError::BadBuffer);
            }
            if inner.frames[i].pin_count != 0 {
                return Err(BufMgrError::PagePinned);
            }
            if inner.frames[i].dirty {
                let page = Page::from_parts(inner.frames[i].page_no, inner.frames[i].data.clone());
                file.write_page(&page)?;
                inner.stats.diskwrites += 1;
                inner.frames[i].dirty = false;
            }
            let key = (fid, inner.frames[i].page_no);
            inner.index.remove(key)?;
            inner.frames[i] = Frame::empty();
        }
        Ok(())
    }

    /// Destroy `(file, page_no)`: evict it from the pool if resident
    /// (discarding any dirty bit) and ask the file store to delete it.
    /// Disposing a page that was never read is not an error.
    pub fn dispose_page(&self, file: &File, page_no: PageId) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let key = (file.id(), page_no);
        if let Ok(frame_no) = inner.index.lookup(key) {
            inner.index.remove(key)?;
            inner.frames[frame_no] = Frame::empty();
        }
        drop(inner);
        file.delete_page(page_no)
    }

    /// Current statistics snapshot.
    pub fn get_stats(&self) -> BufStats {
        self.inner.borrow().stats
    }

    /// Reset all statistics counters to zero.
    pub fn clear_stats(&self) {
        self.inner.borrow_mut().stats = BufStats::default();
    }

    /// Print a one-line-per-frame summary to stderr. A diagnostic aid, not
    /// a logging facility -- this crate takes no logging dependency.
    pub fn print_self(&self) {
        let inner = self.inner.borrow();
        for (i, frame) in inner.frames.iter().enumerate() {
            if frame.valid {
                eprintln!(
                    "frame {i}: file={:?} page={} pin={} dirty={} refbit={}",
                    frame.file.as_ref().map(File::id),
                    frame.page_no,
                    frame.pin_count,
                    frame.dirty,
                    frame.refbit,
                );
            } else {
                eprintln!("frame {i}: empty");
            }
        }
    }

    pub(crate) fn frame_data(&self, frame_no: usize) -> Ref<'_, [u8; DATA_SIZE]> {
        Ref::map(self.inner.borrow(), |inner| &*inner.frames[frame_no].data)
    }

    pub(crate) fn frame_data_mut(&self, frame_no: usize) -> RefMut<'_, [u8; DATA_SIZE]> {
        RefMut::map(self.inner.borrow_mut(), |inner| {
            &mut *inner.frames[frame_no].data
        })
    }
}
