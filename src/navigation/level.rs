//! Router levels.
//!
//! # Responsibilities
//! - Hold the current screen for one depth
//! - Exclusively own the next-deeper level (dropping a level drops its subtree)
//! - Apply a single-level change: replace in place, or attach a new level
//!
//! # Design Decisions
//! - One generic node type for every depth instead of a type per level
//! - Depth is 1-based; depth 0 is the root, which has no destination screen
//! - Applying a screen below a missing parent is reported, never panics

/// One nested navigation level.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterLevel<S> {
    depth: usize,
    screen: S,
    child: Option<Box<RouterLevel<S>>>,
}

impl<S> RouterLevel<S> {
    pub fn new(depth: usize, screen: S) -> Self {
        Self {
            depth,
            screen,
            child: None,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn child(&self) -> Option<&RouterLevel<S>> {
        self.child.as_deref()
    }
}

/// Result of applying a screen at a given depth.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelChange<S> {
    /// A new level was created and attached.
    Pushed { depth: usize, screen: S },
    /// An existing level's screen was mutated in place.
    Replaced { depth: usize, screen: S },
    /// The level already showed this screen.
    Unchanged { depth: usize },
    /// The level's parent no longer exists; nothing was applied.
    Orphaned { depth: usize },
    /// Every level deeper than `below` was dropped.
    Pruned { below: usize },
}

/// The chain of levels hanging off the root.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelChain<S> {
    head: Option<Box<RouterLevel<S>>>,
}

impl<S> Default for LevelChain<S> {
    fn default() -> Self {
        Self { head: None }
    }
}

impl<S> LevelChain<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first level, if any.
    pub fn first(&self) -> Option<&RouterLevel<S>> {
        self.head.as_deref()
    }

    /// Level at `depth` (1-based).
    pub fn level(&self, depth: usize) -> Option<&RouterLevel<S>> {
        if depth == 0 {
            return None;
        }
        let mut node = self.head.as_deref()?;
        for _ in 1..depth {
            node = node.child.as_deref()?;
        }
        Some(node)
    }

    fn level_mut(&mut self, depth: usize) -> Option<&mut RouterLevel<S>> {
        if depth == 0 {
            return None;
        }
        let mut node = self.head.as_deref_mut()?;
        for _ in 1..depth {
            node = node.child.as_deref_mut()?;
        }
        Some(node)
    }

    /// Number of levels currently attached.
    pub fn depth(&self) -> usize {
        self.screens().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Screens from the shallowest level to the deepest.
    pub fn screens(&self) -> impl Iterator<Item = &S> + '_ {
        std::iter::successors(self.head.as_deref(), |level| level.child.as_deref())
            .map(|level| &level.screen)
    }

    /// Screen of the deepest level.
    pub fn deepest(&self) -> Option<&S> {
        self.screens().last()
    }

    /// Drop every level deeper than `depth`. Returns true if any were dropped.
    pub fn truncate(&mut self, depth: usize) -> bool {
        if depth == 0 {
            return self.head.take().is_some();
        }
        match self.level_mut(depth) {
            Some(level) => level.child.take().is_some(),
            None => false,
        }
    }
}

impl<S: PartialEq + Clone> LevelChain<S> {
    /// Show `screen` at `depth`, mutating in place or attaching a new level.
    pub fn apply(&mut self, depth: usize, screen: S) -> LevelChange<S> {
        if let Some(level) = self.level_mut(depth) {
            if level.screen == screen {
                return LevelChange::Unchanged { depth };
            }
            level.screen = screen.clone();
            return LevelChange::Replaced { depth, screen };
        }

        let new_level = Some(Box::new(RouterLevel::new(depth, screen.clone())));
        if depth == 1 {
            self.head = new_level;
            return LevelChange::Pushed { depth, screen };
        }
        match self.level_mut(depth - 1) {
            Some(parent) => {
                parent.child = new_level;
                LevelChange::Pushed { depth, screen }
            }
            None => LevelChange::Orphaned { depth },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_pushes_then_replaces() {
        let mut chain = LevelChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.apply(1, "card"), LevelChange::Pushed { depth: 1, screen: "card" });
        assert_eq!(chain.apply(2, "tx"), LevelChange::Pushed { depth: 2, screen: "tx" });
        assert_eq!(chain.apply(1, "account"), LevelChange::Replaced { depth: 1, screen: "account" });
        assert_eq!(chain.apply(1, "account"), LevelChange::Unchanged { depth: 1 });

        // Replacing in place keeps the subtree.
        assert_eq!(chain.screens().copied().collect::<Vec<_>>(), vec!["account", "tx"]);
        assert_eq!(chain.level(2).map(|l| l.depth()), Some(2));
        assert_eq!(chain.first().and_then(|l| l.child()).map(|l| *l.screen()), Some("tx"));
    }

    #[test]
    fn test_apply_without_parent_is_orphaned() {
        let mut chain = LevelChain::new();
        assert_eq!(chain.apply(3, "deep"), LevelChange::Orphaned { depth: 3 });
        assert!(chain.is_empty());
    }

    #[test]
    fn test_truncate_drops_subtree() {
        let mut chain = LevelChain::new();
        chain.apply(1, 1);
        chain.apply(2, 2);
        chain.apply(3, 3);
        assert_eq!(chain.depth(), 3);
        assert_eq!(chain.deepest(), Some(&3));

        assert!(chain.truncate(1));
        assert_eq!(chain.depth(), 1);
        assert!(chain.level(2).is_none());
        assert!(!chain.truncate(1));
        assert!(!chain.truncate(5));

        assert!(chain.truncate(0));
        assert!(chain.is_empty());
        assert!(!chain.truncate(0));
    }
}
