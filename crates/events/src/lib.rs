use tokio::sync::broadcast::{Receiver, Sender};

pub use crate::{bus::*, event::*, event_data::*};

mod bus;
mod event;
mod event_data;

pub const DEFAULT_BUFFER: usize = primitives::DEFAULT_EVENT_BUFFER;

pub type EventPublisher = Sender<EventMessage>;
pub type EventSubscriber = Receiver<EventMessage>;
