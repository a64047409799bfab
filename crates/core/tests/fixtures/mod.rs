//! Configurable types shared by the integration tests

#![allow(dead_code)]

use confix_core::{
    from_fn, ConversionError, Configurable, InjectionResult, ModuleInfo, PropertyDescriptor,
    PropertyEngine, PropertyTable, ValueSource,
};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const STRING_KEY: &str = "string_key";
pub const FOO_KEY: &str = "foo";

confix_core::config_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum CustomEnum {
        Type1,
        #[default]
        Default,
    }
}

/// Value type with no standard converter
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomType {
    pub value: String,
}

fn custom_engine() -> PropertyEngine<Foo> {
    PropertyEngine::new().register::<CustomType>(from_fn(|text: &str| {
        Ok::<_, ConversionError>(CustomType {
            value: text.to_string(),
        })
    }))
}

thread_local! {
    static FOO_ENGINE: PropertyEngine<Foo> = custom_engine();
}

#[derive(Debug, Default)]
pub struct Foo {
    pub string_value: String,
    pub long_value: i64,
    pub int_value: i32,
    pub float_value: f32,
    pub double_value: f64,
    pub boxed_double: Option<f64>,
    pub custom_value: CustomType,
    pub custom_enum: CustomEnum,
}

impl Foo {
    /// Build from a source using the per-thread engine
    pub fn new<S: ValueSource + ?Sized>(source: &S) -> InjectionResult<Self> {
        let mut foo = Foo::default();
        FOO_ENGINE.with(|engine| engine.inject(&mut foo, source))?;
        Ok(foo)
    }

    fn set_boxed_double(&mut self, value: f64) {
        self.boxed_double = Some(value);
    }
}

impl Configurable for Foo {
    fn properties() -> PropertyTable<Self> {
        PropertyTable::new()
            .with(
                PropertyDescriptor::field(STRING_KEY, |f: &mut Foo| &mut f.string_value)
                    .with_default("default")
                    .with_description("a string"),
            )
            .with(
                PropertyDescriptor::field("long_key", |f: &mut Foo| &mut f.long_value)
                    .with_default("0")
                    .with_description("a long"),
            )
            .with(
                PropertyDescriptor::field("int_key", |f: &mut Foo| &mut f.int_value)
                    .with_default("0")
                    .with_description("an int"),
            )
            .with(
                PropertyDescriptor::field("float_key", |f: &mut Foo| &mut f.float_value)
                    .with_default("0.0")
                    .with_description("a float"),
            )
            .with(
                PropertyDescriptor::field("double_key", |f: &mut Foo| &mut f.double_value)
                    .with_default("0.0")
                    .with_description("a double"),
            )
            .with(
                PropertyDescriptor::setter("Double_key", Foo::set_boxed_double)
                    .with_default("1.0")
                    .with_description("an optional double"),
            )
            .with(
                PropertyDescriptor::field("custom_key", |f: &mut Foo| &mut f.custom_value)
                    .with_default("custom_default")
                    .with_description("a custom object"),
            )
            .with(
                PropertyDescriptor::enum_field("enum_key", |f: &mut Foo| &mut f.custom_enum)
                    .with_default("Default")
                    .with_description("a custom enum setting"),
            )
    }
}

fn bar_engine() -> &'static PropertyEngine<Bar> {
    static ENGINE: OnceLock<PropertyEngine<Bar>> = OnceLock::new();
    ENGINE.get_or_init(PropertyEngine::new)
}

/// Setter-only target backed by dynamic storage
#[derive(Debug, Default)]
pub struct Bar {
    storage: HashMap<String, String>,
}

impl Bar {
    pub fn new<S: ValueSource + ?Sized>(source: &S) -> InjectionResult<Self> {
        Self::with_prefix(source, "")
    }

    /// Build from keys scoped under `prefix`, sharing one engine between prefixes
    pub fn with_prefix<S: ValueSource + ?Sized>(source: &S, prefix: &str) -> InjectionResult<Self> {
        let engine = bar_engine();
        let mut bar = Bar::default();
        confix_core::inject(&mut bar, source, &engine.resolve(), prefix, engine.options().coercion)?;
        Ok(bar)
    }

    pub fn foo(&self) -> Option<&str> {
        self.storage.get(FOO_KEY).map(String::as_str)
    }

    fn set(&mut self, foo: String) {
        self.storage.insert(FOO_KEY.to_string(), foo);
    }
}

impl Configurable for Bar {
    fn properties() -> PropertyTable<Self> {
        PropertyTable::new().with(PropertyDescriptor::setter(FOO_KEY, Bar::set).with_default("default"))
    }
}

/// Grouping type whose only purpose is to reference Foo and Bar
pub struct Module;

impl Configurable for Module {
    fn properties() -> PropertyTable<Self> {
        PropertyTable::new()
    }

    fn module() -> Option<ModuleInfo> {
        Some(
            ModuleInfo::new("foo and bar settings")
                .with_ref::<Foo>()
                .with_ref::<Bar>()
                .with_ref::<Module>(),
        )
    }
}
