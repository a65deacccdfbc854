//! The application's navigation hierarchy.
//!
//! ```text
//! depth 1   CardDetails(card)                 Account
//! depth 2   TransactionDetails(card, tx)      TerminatedCards     Contact
//! depth 3                                     TerminatedCardDetails(card)
//! depth 4                                     TerminatedCardTransactionDetails(card, tx)
//! ```

use serde::Serialize;

use crate::app::types::{Card, CardTransaction};
use crate::navigation::Destination;

/// Deepest level any destination reaches.
pub const MAX_DEPTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum AppDestination {
    CardDetails {
        card: Card,
    },
    TransactionDetails {
        card: Card,
        transaction: CardTransaction,
    },
    Account,
    TerminatedCards,
    Contact,
    TerminatedCardDetails {
        card: Card,
    },
    TerminatedCardTransactionDetails {
        card: Card,
        transaction: CardTransaction,
    },
}

impl Destination for AppDestination {
    fn parent(&self) -> Option<Self> {
        match self {
            AppDestination::CardDetails { .. } | AppDestination::Account => None,
            AppDestination::TransactionDetails { card, .. } => {
                Some(AppDestination::CardDetails { card: card.clone() })
            }
            AppDestination::TerminatedCards | AppDestination::Contact => Some(AppDestination::Account),
            AppDestination::TerminatedCardDetails { .. } => Some(AppDestination::TerminatedCards),
            AppDestination::TerminatedCardTransactionDetails { card, .. } => {
                Some(AppDestination::TerminatedCardDetails { card: card.clone() })
            }
        }
    }
}
