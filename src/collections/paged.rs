use crate::Result;

/// The paging state of one page of a larger sequence.
///
/// Page indices start at 1.
pub trait PagedList {
    /// Index of the page, starting at 1
    fn current_page_index(&self) -> usize;

    /// Replace the page index
    fn set_current_page_index(&mut self, index: usize);

    /// Maximum number of items on a page
    fn page_size(&self) -> usize;

    /// Replace the page size
    fn set_page_size(&mut self, size: usize);

    /// Number of items in the whole sequence
    fn total_item_count(&self) -> usize;

    /// Replace the total item count
    fn set_total_item_count(&mut self, count: usize);
}

/// A [`PagedList`] that holds the items of its page
pub trait TypedPagedList<T>: PagedList {
    /// Items of the current page
    fn items(&self) -> &[T];
}

/// One page of items together with its paging state.
///
/// ```rust
/// use pure_ext::collections::{PagedList, PagedVec, TypedPagedList};
///
/// let page = PagedVec::from_source(1..=25, 3, 10)?;
/// assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
/// assert_eq!(page.page_count(), 3);
/// assert!(!page.has_next_page());
/// assert_eq!(page.total_item_count(), 25);
/// # Ok::<(), pure_ext::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedVec<T> {
    items: Vec<T>,
    current_page_index: usize,
    page_size: usize,
    total_item_count: usize,
}

impl<T> PagedVec<T> {
    /// Wrap the items of an already selected page
    ///
    /// # Errors
    /// Returns [`crate::Error::Argument`] if `current_page_index` or `page_size` is zero.
    pub fn new(
        items: Vec<T>,
        current_page_index: usize,
        page_size: usize,
        total_item_count: usize,
    ) -> Result<Self> {
        if current_page_index == 0 {
            return Err(argument_error!("Page index starts at 1"));
        }
        if page_size == 0 {
            return Err(argument_error!("Page size must be greater than zero"));
        }

        Ok(PagedVec {
            items,
            current_page_index,
            page_size,
            total_item_count,
        })
    }

    /// Select page `current_page_index` of `source`, counting every item of it
    ///
    /// # Errors
    /// Returns [`crate::Error::Argument`] if `current_page_index` or `page_size` is zero.
    pub fn from_source<I>(source: I, current_page_index: usize, page_size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        if current_page_index == 0 {
            return Err(argument_error!("Page index starts at 1"));
        }
        if page_size == 0 {
            return Err(argument_error!("Page size must be greater than zero"));
        }

        let skip = (current_page_index - 1).saturating_mul(page_size);
        let mut total_item_count = 0;
        let source = source.into_iter();
        let mut items = Vec::with_capacity(page_size.min(source.size_hint().0));
        for (index, item) in source.enumerate() {
            total_item_count += 1;
            if index >= skip && items.len() < page_size {
                items.push(item);
            }
        }

        Self::new(items, current_page_index, page_size, total_item_count)
    }

    /// Number of pages needed for all items
    #[must_use]
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_item_count.div_ceil(self.page_size)
    }

    /// A page precedes this one
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.current_page_index > 1
    }

    /// A page follows this one
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.current_page_index < self.page_count()
    }

    /// Position of the first item of the page in the whole sequence, starting at 1
    #[must_use]
    pub fn start_item_index(&self) -> usize {
        self.current_page_index
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .saturating_add(1)
            .min(self.total_item_count)
    }

    /// Position of the last item of the page in the whole sequence
    #[must_use]
    pub fn end_item_index(&self) -> usize {
        self.current_page_index
            .saturating_mul(self.page_size)
            .min(self.total_item_count)
    }

    /// Iterate over the items of the page
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of items on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The page holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the items out of the page
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> PagedList for PagedVec<T> {
    fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    fn set_current_page_index(&mut self, index: usize) {
        self.current_page_index = index;
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn set_page_size(&mut self, size: usize) {
        self.page_size = size;
    }

    fn total_item_count(&self) -> usize {
        self.total_item_count
    }

    fn set_total_item_count(&mut self, count: usize) {
        self.total_item_count = count;
    }
}

impl<T> TypedPagedList<T> for PagedVec<T> {
    fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for PagedVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PagedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
