// Integration tests for the dependency injection container

use girder_core::{Container, Error};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct DatabasePool {
    dsn: String,
}

#[derive(Debug, PartialEq)]
struct MailService {
    host: String,
}

#[test]
fn register_and_resolve_typed_provider() {
    let container = Container::new();
    container.register(DatabasePool {
        dsn: "postgres://localhost".to_string(),
    });

    let pool = container.resolve::<DatabasePool>().unwrap();
    assert_eq!(pool.dsn, "postgres://localhost");
}

#[test]
fn resolving_unregistered_provider_fails() {
    let container = Container::new();

    match container.resolve::<MailService>() {
        Err(Error::ProviderNotFound(name)) => assert!(name.contains("MailService")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn has_reports_registration() {
    let container = Container::new();
    assert!(!container.has::<DatabasePool>());

    container.register(DatabasePool {
        dsn: "sqlite::memory:".to_string(),
    });
    assert!(container.has::<DatabasePool>());
}

#[test]
fn registering_twice_replaces_the_provider() {
    let container = Container::new();
    container.register(DatabasePool {
        dsn: "first".to_string(),
    });
    container.register(DatabasePool {
        dsn: "second".to_string(),
    });

    assert_eq!(container.resolve::<DatabasePool>().unwrap().dsn, "second");
}

#[test]
fn named_instances_are_resolved_by_name_and_type() {
    let container = Container::new();
    container.instance("mail.primary", MailService {
        host: "smtp.example.com".to_string(),
    });

    assert!(container.bound("mail.primary"));
    let mail = container.make::<MailService>("mail.primary").unwrap();
    assert_eq!(mail.host, "smtp.example.com");

    // Right name, wrong type.
    assert!(container.make::<DatabasePool>("mail.primary").is_err());

    match container.make::<MailService>("mail.backup") {
        Err(Error::InstanceNotFound(name)) => assert_eq!(name, "mail.backup"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn clones_share_bindings() {
    let container = Container::new();
    let clone = container.clone();

    container.instance("answer", 42i64);
    let resolved = clone.make::<i64>("answer").unwrap();
    assert_eq!(*resolved, 42);
}

#[test]
fn clear_removes_all_bindings() {
    let container = Container::new();
    container.register(DatabasePool {
        dsn: "x".to_string(),
    });
    container.instance("answer", 42i64);

    container.clear();
    assert!(!container.has::<DatabasePool>());
    assert!(!container.bound("answer"));
}

#[test]
fn resolved_providers_are_shared_handles() {
    let container = Container::new();
    container.register(DatabasePool {
        dsn: "shared".to_string(),
    });

    let a = container.resolve::<DatabasePool>().unwrap();
    let b = container.resolve::<DatabasePool>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}
