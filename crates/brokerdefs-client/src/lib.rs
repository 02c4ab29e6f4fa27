pub mod client;
pub mod codec;
pub mod error;
pub mod http;
pub mod path;
pub mod transport;

pub use client::DefinitionsClient;
pub use codec::{decode_definitions, encode_definitions, JSON_CONTENT_TYPE};
pub use error::{ClientError, DecodeError};
pub use http::{EndpointError, HttpTransport, ManagementEndpoint, DEFAULT_TIMEOUT_MS};
pub use path::{definitions_path, encode_path_segment, DEFINITIONS_PATH};
pub use transport::{RawResponse, Transport, TransportError};
