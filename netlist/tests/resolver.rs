use bnet_netlist::{Error, NameResolver, NodeId};

#[test]
fn test_forward_reference() {
    let mut resolver = NameResolver::new();
    let pending = resolver.reference("n1");
    assert_eq!(resolver.resolve(pending), None);
    assert!(!resolver.is_declared("n1"));
    let declared = resolver.declare("n1", NodeId::from_index(7)).unwrap();
    assert_eq!(declared, pending);
    assert_eq!(resolver.resolve(pending), Some(NodeId::from_index(7)));
    assert_eq!(resolver.lookup("n1"), Some(NodeId::from_index(7)));
    assert_eq!(resolver.name(pending), "n1");
    assert!(resolver.resolve_all().is_ok());
}

#[test]
fn test_reference_after_declare() {
    let mut resolver = NameResolver::new();
    resolver.declare("a", NodeId::from_index(0)).unwrap();
    let pending = resolver.reference("a");
    assert_eq!(resolver.resolve(pending), Some(NodeId::from_index(0)));
    assert_eq!(resolver.len(), 1);
}

#[test]
fn test_duplicate_declaration() {
    let mut resolver = NameResolver::new();
    resolver.declare("a", NodeId::from_index(0)).unwrap();
    resolver.declare("a", NodeId::from_index(0)).unwrap();
    match resolver.declare("a", NodeId::from_index(1)) {
        Err(Error::DuplicateDeclaration(name)) => assert_eq!(name, "a"),
        result => panic!("unexpected result {result:?}"),
    }
    assert_eq!(resolver.lookup("a"), Some(NodeId::from_index(0)));
}

#[test]
fn test_first_unresolved_reported() {
    let mut resolver = NameResolver::new();
    resolver.reference("late");
    resolver.reference("early_declared");
    resolver.reference("missing");
    resolver.declare("early_declared", NodeId::from_index(3)).unwrap();
    resolver.declare("late", NodeId::from_index(4)).unwrap();
    match resolver.resolve_all() {
        Err(Error::UnresolvedSignal(name)) => assert_eq!(name, "missing"),
        result => panic!("unexpected result {result:?}"),
    }
}

#[test]
fn test_empty() {
    let resolver = NameResolver::new();
    assert!(resolver.is_empty());
    assert_eq!(resolver.lookup("a"), None);
    assert!(resolver.resolve_all().is_ok());
}
