use crate::adapter::ContainerId;
use crate::instance::InstanceId;
use crate::toolkit::NativeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("unknown element type: {0:?}")]
    UnknownElementType(String),

    #[error("unknown instance {0}")]
    UnknownInstance(InstanceId),

    #[error("unknown container {0:?}")]
    UnknownContainer(ContainerId),

    #[error(transparent)]
    Native(#[from] NativeError),

    #[error("Lua error: {0}")]
    Lua(#[from] mlua::Error),
}

pub type Result<T> = std::result::Result<T, AdapterError>;
