//! Scoped page handles.
//!
//! [`PageView`] and [`PageViewMut`] are the only way code outside this
//! module touches a resident page's bytes. Each wraps exactly one pin on
//! one `(file, page)` pair and calls `un_pin_page` from its `Drop` impl, so
//! a pin can never outlive the scope that acquired it -- there is no way
//! to forget to unpin. Neither type is `Clone` or `Copy`: a pin is moved,
//! never duplicated.

use std::cell::{Ref, RefMut};

use super::BufferPool;
use crate::error::Result;
use crate::file::{File, PageId, DATA_SIZE};

/// A pinned, read-only view over a resident page.
pub struct PageView<'a> {
    pool: &'a BufferPool,
    file: File,
    page_no: PageId,
    frame_no: usize,
}

impl<'a> PageView<'a> {
    pub(crate) fn new(pool: &'a BufferPool, file: File, page_no: PageId, frame_no: usize) -> Self {
        PageView {
            pool,
            file,
            page_no,
            frame_no,
        }
    }

    /// The page number this view is pinning.
    #[inline]
    pub fn page_number(&self) -> PageId {
        self.page_no
    }

    /// Borrow the page's bytes.
    pub fn data(&self) -> Ref<'_, [u8; DATA_SIZE]> {
        self.pool.frame_data(self.frame_no)
    }
}

impl Drop for PageView<'_> {
    fn drop(&mut self) {
        let _ = self.pool.un_pin_page(&self.file, self.page_no, false);
    }
}

/// A pinned, mutable view over a resident page.
///
/// Unpinning always marks the page dirty, regardless of whether
/// [`PageViewMut::data_mut`] was ever called -- a caller asking for a
/// mutable view is assumed to intend a write.
pub struct PageViewMut<'a> {
    pool: &'a BufferPool,
    file: File,
    page_no: PageId,
    frame_no: usize,
}

impl<'a> PageViewMut<'a> {
    pub(crate) fn new(pool: &'a BufferPool, file: File, page_no: PageId, frame_no: usize) -> Self {
        PageViewMut {
            pool,
            file,
            page_no,
            frame_no,
        }
    }

    /// The page number this view is pinning.
    #[inline]
    pub fn page_number(&self) -> PageId {
        self.page_no
    }

    /// Borrow the page's bytes.
    pub fn data(&self) -> Ref<'_, [u8; DATA_SIZE]> {
        self.pool.frame_data(self.frame_no)
    }

    /// Mutably borrow the page's bytes.
    pub fn data_mut(&mut self) -> RefMut<'_, [u8; DATA_SIZE]> {
        self.pool.frame_data_mut(self.frame_no)
    }

    /// Produce an immutable view over the same resident frame, without
    /// releasing this mutable pin or touching the dirty bit -- the new
    /// view holds a separate, independent pin on top of this one.
    pub fn downgrade(&self) -> Result<PageView<'a>> {
        let frame_no = self.pool.fetch_frame(&self.file, self.page_no)?;
        Ok(PageView::new(self.pool, self.file.clone(), self.page_no, frame_no))
    }
}

impl Drop for PageViewMut<'_> {
    fn drop(&mut self) {
        let _ = self.pool.un_pin_page(&self.file, self.page_no, true);
    }
}
