use once_cell::unsync::OnceCell;

/// A deferred, memoized materialization of a matched substring.
///
/// Actions often ignore the matched text entirely (introducers, closers,
/// plain accumulators), so the engine never copies it eagerly; the first
/// call to [`get`](LazyText::get) slices and caches it.
pub struct LazyText<'t> {
    text: &'t str,
    start: usize,
    end: usize,
    cell: OnceCell<String>,
}

impl<'t> LazyText<'t> {
    pub(crate) fn new(text: &'t str, start: usize, end: usize) -> Self {
        Self {
            text,
            start,
            end,
            cell: OnceCell::new(),
        }
    }

    /// The matched text; computed once, cached thereafter.
    pub fn get(&self) -> &str {
        self.cell
            .get_or_init(|| self.text[self.start..self.end].to_string())
    }

    /// Length of the match in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memoizes_the_slice() {
        let txt = LazyText::new("hello world", 6, 11);
        assert_eq!(txt.get(), "world");
        // Second call returns the cached value.
        assert_eq!(txt.get(), "world");
        assert_eq!(txt.len(), 5);
    }

    #[test]
    fn empty_range() {
        let txt = LazyText::new("abc", 1, 1);
        assert!(txt.is_empty());
        assert_eq!(txt.get(), "");
    }
}
