// gateway-transform: adapter between the generic conversation model and
// the gateway's chat-completion wire format.
#![allow(clippy::result_large_err)]

pub mod adapter;
pub mod config;
pub mod sign;
pub mod util;

mod finish;
mod stream;
mod translate;
mod wire;

pub use adapter::{GatewayAdapter, GatewayAdapterBuilder};
pub use config::GatewayConfig;
pub use sign::{ConsumerHeaderSigner, ConsumerIdentity, RequestSigner};
pub use stream::StreamDecoder;

// --- Curated re-exports from gateway-transform-types ---
// We avoid `pub use gateway_transform_types::*` to keep the public API
// surface intentional and prevent internal types from leaking to consumers.
pub use gateway_transform_types::{
    AdapterTimeout,
    // Type aliases
    BoxFuture,
    BoxStream,
    // Adapter trait
    ChatAdapter,
    ContentKind,
    ContentPart,
    // Errors
    Error,
    ErrorKind,
    FinishReason,
    GenerationMode,
    GenerationResult,
    // Content data types
    ImageData,
    ImageSource,
    // Messages and content
    Message,
    // Request/Response
    Request,
    ResponseFormat,
    Role,
    // Streaming
    StreamError,
    StreamPart,
    ToolCall,
    ToolCallData,
    ToolChoice,
    // Tools
    ToolDefinition,
    ToolResultData,
    Usage,
};
