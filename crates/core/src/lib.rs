//! # confix-core
//!
//! Declarative configuration injection: populate plain Rust structs from flat
//! key/value sources using per-type property tables.
//!
//! ## Features
//!
//! - **Property tables**: each configurable type lists its keys, defaults and descriptions
//! - **Converter registry**: standard converters for numbers, text, locators and enums
//! - **Lenient defaults**: unparsable values fall back to the declared default text
//! - **Prefixes**: scope every key of a type under a common prefix
//! - **Thread-safe engines**: resolve once, inject from any thread
//! - **Module graph**: group types for documentation and template generation
//!
//! ## Quick Start
//!
//! ```rust
//! use confix_core::{Configurable, PropertyDescriptor, PropertyEngine, PropertyTable};
//! use std::collections::HashMap;
//!
//! #[derive(Default)]
//! struct Pool {
//!     size: i32,
//!     name: String,
//! }
//!
//! impl Configurable for Pool {
//!     fn properties() -> PropertyTable<Self> {
//!         PropertyTable::new()
//!             .with(PropertyDescriptor::field("size", |p: &mut Pool| &mut p.size).with_default("8"))
//!             .with(PropertyDescriptor::field("name", |p: &mut Pool| &mut p.name).with_default("main"))
//!     }
//! }
//!
//! let engine = PropertyEngine::<Pool>::new().with_prefix("pool.");
//! let mut source = HashMap::new();
//! source.insert("pool.size".to_string(), "32".to_string());
//!
//! let mut pool = Pool::default();
//! engine.inject(&mut pool, &source).unwrap();
//! assert_eq!(pool.size, 32);
//! assert_eq!(pool.name, "main");
//! ```

pub mod cache;
pub mod config;
pub mod converter;
pub mod descriptor;
pub mod engine;
pub mod errors;
pub mod injector;
pub mod module;
pub mod resolver;
pub mod source;
pub mod types;

pub use cache::ResolutionCache;
pub use config::{CoercionPolicy, EngineOptions};
pub use converter::{from_fn, Converter, ConverterRegistry, FnConverter};
pub use descriptor::{Configurable, MemberKind, PropertyDescriptor, PropertyMetadata, PropertyTable};
pub use engine::PropertyEngine;
pub use errors::{AccessError, ConfigError, ConversionError, InjectionError, InjectionResult};
pub use injector::inject;
pub use module::{annotated_properties, referenced_properties, referenced_types, ModuleInfo, TypeRef};
pub use resolver::{resolve, ResolvedProperty, ResolvedPropertySet};
pub use source::{SourceValue, ValueSource};
pub use types::{BigDecimal, BigInteger, BoxedValue, ConfigEnum, DeclaredType, EnumShape};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
