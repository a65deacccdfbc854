//! Destination path decomposition.

use std::fmt;

/// One addressable point in a nested navigation hierarchy.
///
/// Implementors only describe the direct parent; the ancestor chain is
/// derived from it, so it can never branch or cycle.
pub trait Destination: Clone + PartialEq + fmt::Debug {
    /// The destination one level up, or `None` for a first-level destination.
    fn parent(&self) -> Option<Self>;

    /// Ancestor chain, shallowest first, ending with `self`.
    fn path(&self) -> Vec<Self> {
        let mut path = self.parent().map(|parent| parent.path()).unwrap_or_default();
        path.push(self.clone());
        path
    }

    /// Level this destination is shown at (1 for first-level destinations).
    fn depth(&self) -> usize {
        self.path().len()
    }
}

/// Index of the first element where `current` and `next` differ.
///
/// Equals `current.len()` when `next` extends `current`, and `next.len()`
/// when `next` is a prefix of `current`.
pub fn divergence<D: PartialEq>(current: &[D], next: &[D]) -> usize {
    current
        .iter()
        .zip(next)
        .take_while(|(a, b)| a == b)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Dir {
        Root(&'static str),
        Child(&'static str, &'static str),
    }

    impl Destination for Dir {
        fn parent(&self) -> Option<Self> {
            match self {
                Dir::Root(_) => None,
                Dir::Child(parent, _) => Some(Dir::Root(parent)),
            }
        }
    }

    #[test]
    fn test_path_ends_with_self() {
        let child = Dir::Child("a", "b");
        assert_eq!(child.path(), vec![Dir::Root("a"), child.clone()]);
        assert_eq!(child.depth(), 2);
        assert_eq!(Dir::Root("a").path(), vec![Dir::Root("a")]);
    }

    #[test]
    fn test_divergence() {
        assert_eq!(divergence(&[1, 2, 3], &[1, 2, 4]), 2);
        assert_eq!(divergence(&[1, 2], &[1, 2, 3]), 2);
        assert_eq!(divergence(&[1, 2, 3], &[1]), 1);
        assert_eq!(divergence::<i32>(&[], &[1]), 0);
        assert_eq!(divergence(&[5], &[1]), 0);
    }
}
