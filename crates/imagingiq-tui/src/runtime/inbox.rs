//! Inbox channel types.
//!
//! Every spawned handler sends its result here; the runtime drains the
//! receiver and feeds each event to the reducer.

use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
