//! Bookhound engine: HTTP gateway, debounced refresh coordination and the
//! engine thread that runs them.
mod coordinator;
mod engine;
mod gateway;
mod types;

pub use coordinator::{ChannelEventSink, CoordinatorSettings, EventSink, RefreshCoordinator};
pub use engine::{EngineConfig, EngineHandle};
pub use gateway::{
    FailurePolicy, Gateway, GatewaySettings, ReqwestGateway, DEFAULT_BOOKS_ENDPOINT,
    DEFAULT_DOG_ENDPOINT,
};
pub use types::{ActionKey, BookRecord, BooksAndDog, EngineError, EngineEvent, GatewayError};
