pub mod adapter;
pub mod class;
pub mod config;
pub mod error;
pub mod events;
pub mod host_config;
pub mod instance;
pub mod lua;
pub mod priority;
pub mod scheduler;
pub mod style;
pub mod toolkit;

// Re-export key types
pub use adapter::{Adapter, ContainerId};
pub use config::{AdapterConfig, ClassNamePolicy};
pub use error::{AdapterError, Result};
pub use events::{EventType, Handler, UiEvent};
pub use host_config::HostConfig;
pub use instance::{ElementKind, InstanceId, PropValue, Props};
pub use lua::LuaPropsReader;
pub use priority::UpdatePriority;
pub use scheduler::{HostScheduler, LocalScheduler};
pub use style::{Style, StyleInput, StyleValue};
pub use toolkit::{NativeError, StubToolkit, Toolkit};
