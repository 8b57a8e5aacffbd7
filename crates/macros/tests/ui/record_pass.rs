//! Tests for the Record derive macro - successful cases.

use std::collections::{BTreeMap, HashMap};

use depwarn::{Record, RecordDescriptor};

fn is_default_port(port: &u16) -> bool {
    *port == 8080
}

/// A server block with every attribute form.
#[derive(Record)]
pub struct ServerConfig {
    #[deprecation(replaced = "listen", is_default = "is_default_port")]
    port: u16,

    #[deprecation(name = "listen_address")]
    listen: String,

    #[deprecation(removed)]
    workers: Option<u32>,

    #[deprecation(tag = "replaced,tls.ciphers")]
    ciphers: Vec<String>,

    #[deprecation(skip)]
    scratch: Vec<u8>,
}

/// Nested shapes.
#[derive(Record)]
pub struct Root {
    server: ServerConfig,
    servers: Vec<ServerConfig>,
    by_name: HashMap<String, ServerConfig>,
    ordered: BTreeMap<String, Box<ServerConfig>>,
    fallback: Option<ServerConfig>,
}

/// No fields at all.
#[derive(Record)]
pub struct Empty {}

fn main() {
    let server = ServerConfig {
        port: 8080,
        listen: String::new(),
        workers: None,
        ciphers: Vec::new(),
        scratch: vec![1],
    };

    let descriptor: &'static RecordDescriptor = server.descriptor();
    assert_eq!(descriptor.name(), "ServerConfig");
    assert_eq!(descriptor.fields().len(), 4);
    assert_eq!(server.fields().len(), 4);

    let _root = Root {
        server,
        servers: Vec::new(),
        by_name: HashMap::new(),
        ordered: BTreeMap::new(),
        fallback: None,
    };

    assert!(Empty {}.fields().is_empty());
}
