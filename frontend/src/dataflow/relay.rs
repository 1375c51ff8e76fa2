//! Event streaming for drag notifications
//!
//! A `Relay` is the sending half of an unbounded channel. UI callbacks send
//! into it; application code consumes the receiver as a `Stream`.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
#[cfg(debug_assertions)]
use std::panic::Location;
#[cfg(debug_assertions)]
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Type-safe event relay.
///
/// Relays follow the `{source}_{event}_relay` naming pattern:
/// - `card_dropped_relay` - ghost released over the page
/// - `card_drag_started_relay` - card pressed, ghost shown
///
/// ```rust,ignore
/// let (card_dropped_relay, mut card_dropped_stream) = relay::<Rect>();
///
/// card_dropped_relay.send(Rect::new(10.0, 20.0, 160.0, 90.0));
///
/// while let Some(rect) = card_dropped_stream.next().await {
///     zoon::println!("dropped at {rect:?}");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    /// First call site that sent through this relay or any of its clones
    #[cfg(debug_assertions)]
    sender_site: Arc<OnceLock<&'static Location<'static>>>,
}

#[derive(Error, Debug, Clone)]
pub enum RelayError {
    #[error("drag event stream was dropped")]
    ChannelClosed,
    #[cfg(debug_assertions)]
    #[error("relay already sends from {first}, refusing a second source at {second}")]
    SecondSource {
        first: &'static Location<'static>,
        second: &'static Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                sender_site: Arc::default(),
            },
            receiver,
        )
    }

    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = Location::caller();
        let first = *self.sender_site.get_or_init(|| caller);
        if first == caller {
            Ok(())
        } else {
            Err(RelayError::SecondSource { first, second: caller })
        }
    }

    /// Sends an event; silently dropped when nobody listens anymore.
    ///
    /// Debug builds panic when the same relay is sent from a second call site.
    #[track_caller]
    pub fn send(&self, value: T) {
        #[cfg(debug_assertions)]
        if let Err(error) = self.check_single_source() {
            panic!("{error}");
        }

        let _ = self.sender.unbounded_send(value);
    }

    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

impl<T> Default for Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Disconnected relay; every event is discarded
    fn default() -> Self {
        let (relay, _receiver) = Self::new();
        relay
    }
}

pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}
