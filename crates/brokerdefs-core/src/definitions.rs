use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Open-ended runtime parameter entry; its shape depends on the component that owns it.
pub type ParameterDefinition = Map<String, Value>;

/// Open-ended policy entry (`vhost`, `name`, `pattern`, `apply-to`, `definition`, `priority`).
pub type PolicyDefinition = Map<String, Value>;

/// Older tooling wrote the version under this key instead of `rabbit_version`.
const LEGACY_VERSION_KEY: &str = "broker_version";

/// Definitions document as exported by `GET /definitions` and accepted by `POST /definitions`.
///
/// Every section is optional. Empty sections are left out when encoding and
/// keys this model does not know about are carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Definitions {
    #[serde(
        rename = "rabbit_version",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub broker_version: Option<String>,
    #[serde(
        default,
        deserialize_with = "users_from_one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub users: Vec<UserDefinition>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub virtual_hosts: Vec<VirtualHostDefinition>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub permissions: Vec<PermissionDefinition>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub topic_permissions: Vec<TopicPermissionDefinition>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parameters: Vec<ParameterDefinition>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub global_parameters: Vec<GlobalParameterDefinition>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub policies: Vec<PolicyDefinition>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub queues: Vec<QueueDefinition>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub exchanges: Vec<ExchangeDefinition>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub bindings: Vec<BindingDefinition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Serialize for Definitions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Definitions::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Definitions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut definitions = Definitions::deserialize(deserializer)?;
        // `rabbit_version` wins when both keys are present; the legacy key then stays in `extra`.
        if definitions.broker_version.is_none()
            && matches!(definitions.extra.get(LEGACY_VERSION_KEY), Some(Value::String(_)))
        {
            if let Some(Value::String(version)) = definitions.extra.remove(LEGACY_VERSION_KEY) {
                definitions.broker_version = Some(version);
            }
        }
        Ok(definitions)
    }
}

impl Definitions {
    pub fn is_empty(&self) -> bool {
        self.section_counts().iter().all(|(_, count)| *count == 0)
    }

    /// Entry count per collection section, in wire order.
    pub fn section_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("users", self.users.len()),
            ("virtual_hosts", self.virtual_hosts.len()),
            ("permissions", self.permissions.len()),
            ("topic_permissions", self.topic_permissions.len()),
            ("parameters", self.parameters.len()),
            ("global_parameters", self.global_parameters.len()),
            ("policies", self.policies.len()),
            ("queues", self.queues.len()),
            ("exchanges", self.exchanges.len()),
            ("bindings", self.bindings.len()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDefinition {
    pub name: String,
    pub password_hash: String,
    pub hashing_algorithm: String,
    pub tags: UserTags,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User tags in either of the two shapes brokers export: `"administrator,monitoring"`
/// or `["administrator", "monitoring"]`. The shape read is the shape written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserTags {
    Joined(String),
    List(Vec<String>),
}

impl Default for UserTags {
    fn default() -> Self {
        UserTags::Joined(String::new())
    }
}

impl UserTags {
    pub fn names(&self) -> Vec<&str> {
        match self {
            UserTags::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect(),
            UserTags::List(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualHostDefinition {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionDefinition {
    pub user: String,
    pub vhost: String,
    pub configure: String,
    pub write: String,
    pub read: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicPermissionDefinition {
    pub user: String,
    pub vhost: String,
    pub exchange: String,
    pub write: String,
    pub read: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalParameterDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueDefinition {
    pub name: String,
    pub vhost: String,
    pub durable: bool,
    pub auto_delete: bool,
    #[serde(deserialize_with = "null_as_empty_map")]
    pub arguments: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeDefinition {
    pub name: String,
    pub vhost: String,
    #[serde(rename = "type")]
    pub exchange_type: String,
    pub durable: bool,
    pub auto_delete: bool,
    pub internal: bool,
    #[serde(deserialize_with = "null_as_empty_map")]
    pub arguments: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingDefinition {
    pub source: String,
    pub vhost: String,
    pub destination: String,
    pub destination_type: String,
    pub routing_key: String,
    #[serde(deserialize_with = "null_as_empty_map")]
    pub arguments: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

// Older exports carried a single user object under `users`.
fn users_from_one_or_many<'de, D>(deserializer: D) -> Result<Vec<UserDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<OneOrMany<UserDefinition>>::deserialize(deserializer)? {
            None => Vec::new(),
            Some(OneOrMany::Many(users)) => users,
            Some(OneOrMany::One(user)) => vec![user],
        },
    )
}

#[cfg(test)]
#[path = "definitions_test.rs"]
mod tests;
