use super::{
    Definitions, ExchangeDefinition, GlobalParameterDefinition, QueueDefinition, UserDefinition,
    UserTags,
};
use serde_json::{json, Map, Value};

fn full_document() -> Value {
    json!({
        "rabbit_version": "3.12.4",
        "users": [
            {"name": "guest", "password_hash": "h1", "hashing_algorithm": "rabbit_password_hashing_sha256", "tags": "administrator"},
            {"name": "ops", "password_hash": "h2", "hashing_algorithm": "rabbit_password_hashing_sha256", "tags": ["monitoring", "policymaker"]}
        ],
        "virtual_hosts": [{"name": "/"}, {"name": "billing"}],
        "permissions": [{"user": "guest", "vhost": "/", "configure": ".*", "write": ".*", "read": ".*"}],
        "topic_permissions": [{"user": "ops", "vhost": "/", "exchange": "amq.topic", "write": "^ops\\.", "read": ".*"}],
        "parameters": [{"vhost": "/", "component": "shovel", "name": "s1", "value": {"src-uri": "amqp://", "ack-mode": "on-confirm"}}],
        "global_parameters": [
            {"name": "cluster_name", "value": "rabbit@node1"},
            {"name": "internal_cluster_id", "value": {"id": "rabbitmq-cluster-id-1"}}
        ],
        "policies": [{"vhost": "/", "name": "ha", "pattern": "^ha\\.", "apply-to": "queues", "definition": {"ha-mode": "all"}, "priority": 0}],
        "queues": [{"name": "q1", "vhost": "/", "durable": true, "auto_delete": false, "arguments": {"x-queue-type": "quorum"}}],
        "exchanges": [{"name": "events", "vhost": "/", "type": "topic", "durable": true, "auto_delete": false, "internal": false, "arguments": {}}],
        "bindings": [{"source": "events", "vhost": "/", "destination": "q1", "destination_type": "queue", "routing_key": "order.*", "arguments": {}}]
    })
}

#[test]
fn decodes_every_section_of_a_full_export() {
    let definitions: Definitions = serde_json::from_value(full_document()).expect("decode");
    assert_eq!(definitions.broker_version.as_deref(), Some("3.12.4"));
    assert_eq!(definitions.users.len(), 2);
    assert_eq!(definitions.users[0].tags.names(), vec!["administrator"]);
    assert_eq!(
        definitions.users[1].tags.names(),
        vec!["monitoring", "policymaker"]
    );
    assert_eq!(definitions.virtual_hosts[1].name, "billing");
    assert_eq!(definitions.permissions[0].configure, ".*");
    assert_eq!(definitions.topic_permissions[0].exchange, "amq.topic");
    assert_eq!(definitions.parameters[0]["component"], json!("shovel"));
    assert_eq!(
        definitions.global_parameters[1].value,
        json!({"id": "rabbitmq-cluster-id-1"})
    );
    assert_eq!(definitions.policies[0]["apply-to"], json!("queues"));
    assert_eq!(definitions.exchanges[0].exchange_type, "topic");
    assert_eq!(definitions.bindings[0].routing_key, "order.*");
    assert!(definitions.extra.is_empty());
}

#[test]
fn full_export_round_trips_to_the_same_json() {
    let original = full_document();
    let definitions: Definitions = serde_json::from_value(original.clone()).expect("decode");
    let encoded = serde_json::to_value(&definitions).expect("encode");
    assert_eq!(encoded, original);
}

#[test]
fn partial_document_keeps_only_populated_sections() {
    let definitions = Definitions {
        queues: vec![QueueDefinition {
            name: "q1".to_string(),
            vhost: "/".to_string(),
            durable: true,
            ..QueueDefinition::default()
        }],
        ..Definitions::default()
    };
    let encoded = serde_json::to_value(&definitions).expect("encode");
    let object = encoded.as_object().expect("object");
    assert_eq!(object.keys().collect::<Vec<_>>(), vec!["queues"]);
    assert_eq!(
        encoded["queues"][0],
        json!({"name": "q1", "vhost": "/", "durable": true, "auto_delete": false, "arguments": {}})
    );

    let decoded: Definitions = serde_json::from_value(encoded).expect("decode");
    assert_eq!(decoded, definitions);
}

#[test]
fn every_combination_of_sections_round_trips() {
    let full: Definitions = serde_json::from_value(full_document()).expect("decode");
    let sections = full.section_counts().len();
    for mask in 0u32..(1 << sections) {
        let mut partial = Definitions::default();
        if mask & (1 << 0) != 0 {
            partial.users = full.users.clone();
        }
        if mask & (1 << 1) != 0 {
            partial.virtual_hosts = full.virtual_hosts.clone();
        }
        if mask & (1 << 2) != 0 {
            partial.permissions = full.permissions.clone();
        }
        if mask & (1 << 3) != 0 {
            partial.topic_permissions = full.topic_permissions.clone();
        }
        if mask & (1 << 4) != 0 {
            partial.parameters = full.parameters.clone();
        }
        if mask & (1 << 5) != 0 {
            partial.global_parameters = full.global_parameters.clone();
        }
        if mask & (1 << 6) != 0 {
            partial.policies = full.policies.clone();
        }
        if mask & (1 << 7) != 0 {
            partial.queues = full.queues.clone();
        }
        if mask & (1 << 8) != 0 {
            partial.exchanges = full.exchanges.clone();
        }
        if mask & (1 << 9) != 0 {
            partial.bindings = full.bindings.clone();
        }
        let bytes = serde_json::to_vec(&partial).expect("encode");
        let decoded: Definitions = serde_json::from_slice(&bytes).expect("decode");
        assert_eq!(decoded, partial, "mask {mask:#b}");
    }
}

#[test]
fn empty_document_encodes_as_empty_object() {
    let encoded = serde_json::to_string(&Definitions::default()).expect("encode");
    assert_eq!(encoded, "{}");
    assert!(Definitions::default().is_empty());
}

#[test]
fn null_and_missing_sections_decode_as_empty() {
    let definitions: Definitions = serde_json::from_value(json!({
        "users": null,
        "queues": null,
        "bindings": [{"source": "x", "vhost": "/", "destination": "y", "destination_type": "queue", "routing_key": "", "arguments": null}]
    }))
    .expect("decode");
    assert!(definitions.users.is_empty());
    assert!(definitions.queues.is_empty());
    assert!(definitions.exchanges.is_empty());
    assert!(definitions.bindings[0].arguments.is_empty());
}

#[test]
fn nested_arguments_survive_a_round_trip() {
    let arguments = json!({"x-message-ttl": 60000, "x-nested": {"a": 1, "b": [true, null, "s"]}, "x-ratio": 0.5});
    let original = json!({
        "queues": [{"name": "q", "vhost": "/", "durable": false, "auto_delete": true, "arguments": arguments}]
    });
    let definitions: Definitions = serde_json::from_value(original).expect("decode");
    let encoded = serde_json::to_vec(&definitions).expect("encode");
    let decoded: Definitions = serde_json::from_slice(&encoded).expect("decode again");
    assert_eq!(Value::Object(decoded.queues[0].arguments.clone()), arguments);
}

#[test]
fn argument_key_order_is_preserved() {
    let definitions: Definitions = serde_json::from_str(
        r#"{"exchanges":[{"name":"e","vhost":"/","type":"headers","durable":true,"auto_delete":false,"internal":false,"arguments":{"z":1,"a":2,"m":3}}]}"#,
    )
    .expect("decode");
    let keys = definitions.exchanges[0]
        .arguments
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn sequence_order_is_kept_without_deduplication() {
    let definitions: Definitions = serde_json::from_value(json!({
        "virtual_hosts": [{"name": "z"}, {"name": "a"}, {"name": "z"}]
    }))
    .expect("decode");
    let names = definitions
        .virtual_hosts
        .iter()
        .map(|vhost| vhost.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["z", "a", "z"]);
}

#[test]
fn single_user_object_is_read_as_one_element_sequence() {
    let definitions: Definitions = serde_json::from_value(json!({
        "users": {"name": "guest", "password_hash": "h", "hashing_algorithm": "sha256", "tags": "administrator,management"}
    }))
    .expect("decode");
    assert_eq!(
        definitions.users,
        vec![UserDefinition {
            name: "guest".to_string(),
            password_hash: "h".to_string(),
            hashing_algorithm: "sha256".to_string(),
            tags: UserTags::Joined("administrator,management".to_string()),
            extra: Map::new(),
        }]
    );
    let encoded = serde_json::to_value(&definitions).expect("encode");
    assert!(encoded["users"].is_array());
}

#[test]
fn broker_version_alias_is_accepted_and_written_as_rabbit_version() {
    let definitions: Definitions =
        serde_json::from_value(json!({"broker_version": "3.13.0"})).expect("decode");
    assert_eq!(definitions.broker_version.as_deref(), Some("3.13.0"));
    let encoded = serde_json::to_value(&definitions).expect("encode");
    assert_eq!(encoded, json!({"rabbit_version": "3.13.0"}));
}

#[test]
fn unknown_keys_are_passed_through() {
    let original = json!({
        "rabbitmq_version": "3.12.4",
        "product_name": "RabbitMQ",
        "users": [{"name": "u", "password_hash": "", "hashing_algorithm": "", "tags": [], "limits": {"max-connections": 5}}],
        "exchanges": [{"name": "e", "vhost": "/", "type": "x-delayed-message", "durable": true, "auto_delete": false, "internal": false, "arguments": {}, "policy": "p"}]
    });
    let definitions: Definitions = serde_json::from_value(original.clone()).expect("decode");
    assert_eq!(definitions.extra["product_name"], json!("RabbitMQ"));
    assert_eq!(
        definitions.users[0].extra["limits"],
        json!({"max-connections": 5})
    );
    assert_eq!(definitions.exchanges[0].extra["policy"], json!("p"));
    assert_eq!(serde_json::to_value(&definitions).expect("encode"), original);
}

#[test]
fn absent_record_fields_take_defaults() {
    let definitions: Definitions = serde_json::from_value(json!({
        "exchanges": [{"name": "e"}],
        "global_parameters": [{"name": "cluster_name"}]
    }))
    .expect("decode");
    assert_eq!(
        definitions.exchanges[0],
        ExchangeDefinition {
            name: "e".to_string(),
            ..ExchangeDefinition::default()
        }
    );
    assert_eq!(
        definitions.global_parameters[0],
        GlobalParameterDefinition {
            name: "cluster_name".to_string(),
            value: Value::Null,
            extra: Map::new(),
        }
    );
}

#[test]
fn section_counts_follow_wire_order() {
    let definitions: Definitions = serde_json::from_value(full_document()).expect("decode");
    let counts = definitions.section_counts();
    assert_eq!(counts[0], ("users", 2));
    assert_eq!(counts[1], ("virtual_hosts", 2));
    assert_eq!(counts[9], ("bindings", 1));
    assert!(!definitions.is_empty());
}

#[test]
fn malformed_shape_is_rejected() {
    let error = serde_json::from_value::<Definitions>(json!({"queues": {"name": "q"}}))
        .expect_err("queues must be a sequence");
    assert!(error.to_string().contains("invalid type"));
}

#[test]
fn missing_global_parameter_value_is_omitted_not_null() {
    let definitions: Definitions =
        serde_json::from_value(json!({"global_parameters": [{"name": "cluster_name"}]}))
            .expect("decode");
    let encoded = serde_json::to_string(&definitions).expect("encode");
    assert_eq!(encoded, r#"{"global_parameters":[{"name":"cluster_name"}]}"#);
    assert!(!encoded.contains("null"));

    let restored = Definitions {
        global_parameters: vec![GlobalParameterDefinition::default()],
        ..Definitions::default()
    };
    let encoded = serde_json::to_value(&restored).expect("encode");
    assert_eq!(encoded, json!({"global_parameters": [{"name": ""}]}));
}

#[test]
fn both_version_keys_decode_with_rabbit_version_winning() {
    let original = json!({"rabbit_version": "3.12.4", "broker_version": "3.11.0", "queues": []});
    let definitions: Definitions = serde_json::from_value(original).expect("decode");
    assert_eq!(definitions.broker_version.as_deref(), Some("3.12.4"));
    assert_eq!(definitions.extra["broker_version"], json!("3.11.0"));
    assert!(definitions.queues.is_empty());
    assert_eq!(
        serde_json::to_value(&definitions).expect("encode"),
        json!({"rabbit_version": "3.12.4", "broker_version": "3.11.0"})
    );
}

#[test]
fn legacy_version_key_of_the_wrong_type_stays_in_extra() {
    let definitions: Definitions =
        serde_json::from_value(json!({"broker_version": 3})).expect("decode");
    assert_eq!(definitions.broker_version, None);
    assert_eq!(definitions.extra["broker_version"], json!(3));
}
