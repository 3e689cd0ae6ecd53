use super::*;

#[test]
fn node_with_empty_base_url_is_local() {
    let node = Node {
        node_id: NodeId::new("n1"),
        node_name: "primary".into(),
        base_url: String::new(),
        shared_token: String::new(),
    };
    assert!(node.is_local());
}

#[test]
fn node_with_base_url_is_not_local() {
    let node = Node {
        node_id: NodeId::new("n2"),
        node_name: "secondary".into(),
        base_url: "https://n2.internal".into(),
        shared_token: "secret".into(),
    };
    assert!(!node.is_local());
}

#[test]
fn node_yaml_roundtrip() {
    let yaml = "node_id: n2\nnode_name: secondary\nbase_url: https://n2.internal\nshared_token: secret\n";
    let node: Node = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(node.node_name, "secondary");
    assert_eq!(node.base_url, "https://n2.internal");
}
