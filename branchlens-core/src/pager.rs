//! Clamped index over a collection that can be replaced under it.

/// Zero-based cursor over `len` items.
///
/// The index stays within `[0, len - 1]` (or at 0 for an empty collection).
/// `next` and `previous` do nothing at the boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    index: usize,
    len: usize,
}

impl Pager {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.len == 0 || self.index + 1 == self.len
    }

    /// Advances by one. Returns whether the index moved.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.len {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Steps back by one. Returns whether the index moved.
    pub fn previous(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// The underlying collection was replaced: back to the first item.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
    }

    /// Like [`Pager::reset`], but positions the cursor on `index` (clamped).
    pub fn reset_to(&mut self, len: usize, index: usize) {
        self.len = len;
        self.index = index.min(len.saturating_sub(1));
    }

    /// "i/n" label with a one-based index, or "0/0" when empty.
    pub fn label(&self) -> String {
        if self.len == 0 {
            "0/0".to_owned()
        } else {
            format!("{}/{}", self.index + 1, self.len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_pager_never_moves() {
        let mut pager = Pager::new(0);
        assert!(!pager.next());
        assert!(!pager.previous());
        assert_eq!(pager.index(), 0);
        assert!(pager.is_empty());
        assert_eq!(pager.label(), "0/0");
    }

    #[test]
    fn moves_within_bounds() {
        let mut pager = Pager::new(3);
        assert!(!pager.previous());
        assert!(pager.next());
        assert!(pager.next());
        assert!(pager.is_last());
        assert!(!pager.next());
        assert_eq!(pager.index(), 2);
        assert_eq!(pager.label(), "3/3");
        assert!(pager.previous());
        assert_eq!(pager.index(), 1);
    }

    #[test]
    fn reset_returns_to_first() {
        let mut pager = Pager::new(4);
        pager.next();
        pager.next();
        pager.reset(2);
        assert_eq!(pager.index(), 0);
        assert_eq!(pager.len(), 2);
    }

    #[test]
    fn reset_to_clamps() {
        let mut pager = Pager::default();
        pager.reset_to(3, 7);
        assert_eq!(pager.index(), 2);
        pager.reset_to(0, 7);
        assert_eq!(pager.index(), 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Next,
        Previous,
        Reset(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Next),
            Just(Op::Previous),
            (0usize..8).prop_map(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn index_stays_clamped(len in 0usize..8, ops in proptest::collection::vec(op(), 0..40)) {
            let mut pager = Pager::new(len);
            for op in ops {
                let before = pager.index();
                match op {
                    Op::Next => {
                        let moved = pager.next();
                        prop_assert_eq!(moved, before + 1 < pager.len());
                    }
                    Op::Previous => {
                        let moved = pager.previous();
                        prop_assert_eq!(moved, before > 0);
                    }
                    Op::Reset(n) => {
                        pager.reset(n);
                        prop_assert_eq!(pager.index(), 0);
                    }
                }
                prop_assert!(pager.index() < pager.len().max(1));
            }
        }
    }
}
