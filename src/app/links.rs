//! Deep-link table.
//!
//! | path               | intent                         | gated | extra delay |
//! |--------------------|--------------------------------|-------|-------------|
//! | `/cards/:cardId`   | navigate to the card           | yes   | no          |
//! | `/cards`           | pop to root                    | yes   | no          |
//! | `/account/profile` | navigate to contact            | yes   | no          |
//! | `/account/*`       | navigate to account            | yes   | no          |
//! | `/request-card`    | present the request-card sheet | yes   | yes         |
//! | `/login`           | sign in with the demo session  | no    |             |

use serde::Serialize;

use crate::app::destination::AppDestination;
use crate::app::sheet::Sheet;
use crate::app::types::{Card, Session};
use crate::config::MatchingConfig;
use crate::presentation::Presentation;
use crate::routing::{DeepLinkRouter, PathPattern};

/// Something the coordinator can be asked to do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Navigate(Option<AppDestination>),
    Present(Option<Presentation<Sheet>>),
    SignIn(Session),
}

/// A resolved deep link and how it must be dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepLink {
    pub intent: Intent,
    /// Wait for a signed-in session before running.
    pub gated: bool,
    /// Once released, wait for the presentation settle delay.
    pub extra_delay: bool,
}

impl DeepLink {
    fn gated(intent: Intent) -> Self {
        Self {
            intent,
            gated: true,
            extra_delay: false,
        }
    }

    fn presenting(intent: Intent) -> Self {
        Self {
            intent,
            gated: true,
            extra_delay: true,
        }
    }

    fn immediate(intent: Intent) -> Self {
        Self {
            intent,
            gated: false,
            extra_delay: false,
        }
    }
}

/// Build the application's deep-link router.
pub fn deep_links(matching: &MatchingConfig) -> DeepLinkRouter<DeepLink> {
    let pattern = |path: &str| {
        PathPattern::new(path)
            .match_to_end(false)
            .case_sensitive(matching.case_sensitive)
            .boundary_chars(matching.boundary_chars.clone())
    };

    DeepLinkRouter::new()
        .route("card", pattern("/cards/:cardId"), |m| {
            let card = Card::from_id(m.param("cardId").unwrap_or_default());
            DeepLink::gated(Intent::Navigate(Some(AppDestination::CardDetails { card })))
        })
        .route("cards", pattern("/cards"), |_| DeepLink::gated(Intent::Navigate(None)))
        .route("profile", pattern("/account/profile"), |_| {
            DeepLink::gated(Intent::Navigate(Some(AppDestination::Contact)))
        })
        .route("account", pattern("/account/*"), |_| {
            DeepLink::gated(Intent::Navigate(Some(AppDestination::Account)))
        })
        .route("request-card", pattern("/request-card"), |_| {
            DeepLink::presenting(Intent::Present(Some(Presentation::sheet(Sheet::RequestCard))))
        })
        .route("login", pattern("/login"), |_| DeepLink::immediate(Intent::SignIn(Session::demo())))
}
