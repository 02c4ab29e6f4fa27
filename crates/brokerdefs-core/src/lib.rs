pub mod definitions;
pub mod fingerprint;
pub mod format;
pub mod stable_json;

pub use definitions::{
    BindingDefinition, Definitions, ExchangeDefinition, GlobalParameterDefinition,
    ParameterDefinition, PermissionDefinition, PolicyDefinition, QueueDefinition,
    TopicPermissionDefinition, UserDefinition, UserTags, VirtualHostDefinition,
};
pub use fingerprint::definitions_fingerprint;
pub use format::{parse_definitions, render_definitions, DocumentFormat, FormatError};
pub use stable_json::{stable_json_bytes, StableJsonOptions};
