//! Presentation queue state.
//!
//! # Responsibilities
//! - Track the modal currently shown and at most one modal waiting behind it
//! - Track the value the requester last asked for (`backing`)
//! - Resynchronize `backing` after the user dismisses a modal interactively

use serde::Serialize;

/// How a modal is shown by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationStyle {
    Sheet,
    FullScreenCover,
}

/// A request to show `presentable` in a given style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation<P> {
    pub presentable: P,
    pub style: PresentationStyle,
}

impl<P> Presentation<P> {
    pub fn sheet(presentable: P) -> Self {
        Self {
            presentable,
            style: PresentationStyle::Sheet,
        }
    }

    pub fn full_screen_cover(presentable: P) -> Self {
        Self {
            presentable,
            style: PresentationStyle::FullScreenCover,
        }
    }
}

/// Visible effect of a queue operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationChange<P> {
    /// `current` now holds this presentation.
    Shown(Presentation<P>),
    /// The visible modal is being dismissed; `queued` waits behind it.
    Dismissing { queued: Presentation<P> },
    /// Both slots were emptied.
    Cleared,
    /// The host dismissed the modal on its own; `backing` was cleared to match.
    Resynchronized,
    Unchanged,
}

/// Single visible slot plus a single queued slot.
///
/// Invariant: `queued` is only ever set while `current` is empty.
#[derive(Debug, Clone)]
pub struct PresentationQueue<P> {
    backing: Option<Presentation<P>>,
    current: Option<Presentation<P>>,
    queued: Option<Presentation<P>>,
    /// A dismissal we asked the host for has not completed yet.
    dismissing: bool,
}

impl<P> Default for PresentationQueue<P> {
    fn default() -> Self {
        Self {
            backing: None,
            current: None,
            queued: None,
            dismissing: false,
        }
    }
}

impl<P: Clone + std::fmt::Debug> PresentationQueue<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The modal currently visible.
    pub fn current(&self) -> Option<&Presentation<P>> {
        self.current.as_ref()
    }

    /// The modal waiting for the visible one to finish dismissing.
    pub fn queued(&self) -> Option<&Presentation<P>> {
        self.queued.as_ref()
    }

    /// What the requester last asked for.
    pub fn backing(&self) -> Option<&Presentation<P>> {
        self.backing.as_ref()
    }

    /// True while the host is dismissing a modal on our behalf.
    pub fn is_dismissing(&self) -> bool {
        self.dismissing
    }

    pub fn request(&mut self, presentation: Option<Presentation<P>>) -> PresentationChange<P> {
        self.backing = presentation.clone();

        let Some(presentation) = presentation else {
            let had_visible = self.current.take().is_some();
            let had_queued = self.queued.take().is_some();
            self.dismissing |= had_visible;
            return if had_visible || had_queued {
                tracing::debug!("Presentations cleared");
                PresentationChange::Cleared
            } else {
                PresentationChange::Unchanged
            };
        };

        match self.current.take() {
            None => {
                if let Some(stale) = self.queued.take() {
                    tracing::debug!(stale = ?stale, "Queued presentation superseded");
                }
                tracing::debug!(presentation = ?presentation, "Presentation shown");
                self.current = Some(presentation.clone());
                PresentationChange::Shown(presentation)
            }
            Some(visible) => {
                if let Some(replaced) = self.queued.replace(presentation.clone()) {
                    tracing::debug!(replaced = ?replaced, "Queued presentation overwritten");
                }
                self.dismissing = true;
                tracing::debug!(visible = ?visible, queued = ?presentation, "Dismissing visible presentation");
                PresentationChange::Dismissing { queued: presentation }
            }
        }
    }

    /// The host finished dismissing a modal.
    ///
    /// If we asked for the dismissal, the queued modal (if any) is promoted,
    /// and a modal shown directly in the meantime stays. Otherwise the user
    /// dismissed the visible modal and `backing` is cleared to match.
    pub fn on_dismiss_completed(&mut self) -> PresentationChange<P> {
        if std::mem::take(&mut self.dismissing) {
            if self.current.is_some() {
                return PresentationChange::Unchanged;
            }
            return match self.queued.take() {
                Some(next) => {
                    tracing::debug!(presentation = ?next, "Queued presentation promoted");
                    self.current = Some(next.clone());
                    PresentationChange::Shown(next)
                }
                None => PresentationChange::Unchanged,
            };
        }

        if self.current.take().is_none() {
            return PresentationChange::Unchanged;
        }
        self.queued = None;
        if self.backing.take().is_some() {
            tracing::debug!("Interactive dismissal, backing value cleared");
            PresentationChange::Resynchronized
        } else {
            PresentationChange::Cleared
        }
    }
}
