// Prototype Factory via a Generic Serializer
// Deep-clones a dynamic object graph through a type-erased JSON snapshot and
// rebuilds registered types as real instances, without those types knowing
// how to clone themselves.

use colored::Colorize;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::{env, fs};
use thiserror::Error;
use tracing::{debug, trace};

/// Key that carries the registry index of a node inside the snapshot.
const TYPE_INDEX_KEY: &str = "typeIndex";

/// Environment variable naming an offices TOML file.
const OFFICES_CONFIG_ENV: &str = "OFFICES_CONFIG";

// =============================================================================
// Milestone 1: Errors
// =============================================================================

#[derive(Error, Debug)]
enum CloneError {
    #[error("type index {index} is out of range for a registry of {len} types")]
    TypeIndexOutOfRange { index: usize, len: usize },

    #[error("type index {0} is not a non-negative integer")]
    InvalidTypeIndex(String),

    #[error("property 'typeIndex' at {path} is reserved for type tags")]
    ReservedKey { path: String },

    #[error("number at {path} is not finite")]
    NonFiniteNumber { path: String },

    #[error("number {0} cannot be read back as f64")]
    InvalidNumber(String),

    #[error("type '{name}' is already registered")]
    DuplicateType { name: &'static str },

    #[error("another type is already registered as '{name}'")]
    DuplicateName { name: &'static str },

    #[error("property '{key}' is missing or not a {expected}")]
    WrongType { key: String, expected: &'static str },

    #[error("snapshot round-trip failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid offices config: {0}")]
    Parse(#[from] toml::de::Error),
}

// =============================================================================
// Milestone 2: Dynamic object graph
// =============================================================================

type Props = BTreeMap<String, Node>;

/// A value whose state is a bag of own properties.
///
/// Implementors never clone themselves; the [`Serializer`] reads and writes
/// their properties and builds fresh instances through `Default`.
trait Object: Any + fmt::Debug + fmt::Display {
    fn props(&self) -> &Props;
    fn props_mut(&mut self) -> &mut Props;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

macro_rules! impl_object {
    ($ty:ty) => {
        impl Object for $ty {
            fn props(&self) -> &Props {
                &self.props
            }

            fn props_mut(&mut self) -> &mut Props {
                &mut self.props
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn Any> {
                self
            }
        }
    };
}

#[derive(Debug)]
enum Node {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Node>),
    Map(Props),
    Object(Box<dyn Object>),
}

impl Node {
    fn object<T: Object>(value: T) -> Self {
        Node::Object(Box::new(value))
    }

    fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Node::Number(number) => Some(*number),
            _ => None,
        }
    }

    fn downcast_ref<T: Object>(&self) -> Option<&T> {
        match self {
            Node::Object(object) => object.as_any().downcast_ref(),
            _ => None,
        }
    }

    fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        match self {
            Node::Object(object) => object.as_any_mut().downcast_mut(),
            _ => None,
        }
    }

    fn into_object<T: Object>(self) -> Option<T> {
        match self {
            Node::Object(object) => object.into_any().downcast::<T>().ok().map(|boxed| *boxed),
            _ => None,
        }
    }

    /// Structural content with every type erased. Two graphs with equal
    /// content hold the same fields and values.
    ///
    /// Lossy for NaN and infinities: JSON has no such numbers, so they come
    /// out as `null` here, whereas [`Serializer::clone`] rejects them.
    fn content(&self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Bool(flag) => Value::Bool(*flag),
            Node::Number(number) => Number::from_f64(*number).map_or(Value::Null, Value::Number),
            Node::Text(text) => Value::String(text.clone()),
            Node::List(items) => Value::Array(items.iter().map(Node::content).collect()),
            Node::Map(props) => props_content(props),
            Node::Object(object) => props_content(object.props()),
        }
    }
}

fn props_content(props: &Props) -> Value {
    Value::Object(
        props
            .iter()
            .map(|(key, value)| (key.clone(), value.content()))
            .collect(),
    )
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(flag) => write!(f, "{flag}"),
            Node::Number(number) => write!(f, "{number}"),
            Node::Text(text) => write!(f, "{text}"),
            Node::Object(object) => write!(f, "{object}"),
            Node::List(_) | Node::Map(_) => write!(f, "{}", self.content()),
        }
    }
}

impl From<bool> for Node {
    fn from(flag: bool) -> Self {
        Node::Bool(flag)
    }
}

impl From<f64> for Node {
    fn from(number: f64) -> Self {
        Node::Number(number)
    }
}

impl From<u32> for Node {
    fn from(number: u32) -> Self {
        Node::Number(f64::from(number))
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::List(items)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

// =============================================================================
// Milestone 3: Registered types
// =============================================================================

#[derive(Debug)]
struct Address {
    props: Props,
}

impl Default for Address {
    fn default() -> Self {
        Address::new(None, None, None)
    }
}

impl Address {
    fn new(
        suite: Option<u32>,
        street_address: Option<&str>,
        city: Option<&str>,
    ) -> Self {
        let mut props = Props::new();
        props.insert("suite".into(), suite.into());
        props.insert("street_address".into(), street_address.into());
        props.insert("city".into(), city.into());
        Address { props }
    }

    #[allow(dead_code)]
    fn suite(&self) -> Option<f64> {
        self.props.get("suite").and_then(Node::as_number)
    }

    fn set_suite(&mut self, suite: u32) {
        self.props.insert("suite".into(), suite.into());
    }

    #[allow(dead_code)]
    fn street_address(&self) -> Option<&str> {
        self.props.get("street_address").and_then(Node::as_text)
    }

    #[allow(dead_code)]
    fn city(&self) -> Option<&str> {
        self.props.get("city").and_then(Node::as_text)
    }
}

impl_object!(Address);

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Address: {}, {}, {}",
            prop_or_null(&self.props, "suite"),
            prop_or_null(&self.props, "street_address"),
            prop_or_null(&self.props, "city"),
        )
    }
}

#[derive(Debug)]
struct Employee {
    props: Props,
}

impl Default for Employee {
    fn default() -> Self {
        let mut props = Props::new();
        props.insert("name".into(), Node::Null);
        props.insert("address".into(), Node::Null);
        Employee { props }
    }
}

impl Employee {
    fn new(name: Option<&str>, address: Address) -> Self {
        let mut employee = Employee::default();
        employee.props.insert("name".into(), name.into());
        employee.props.insert("address".into(), Node::object(address));
        employee
    }

    fn name(&self) -> Option<&str> {
        self.props.get("name").and_then(Node::as_text)
    }

    fn set_name(&mut self, name: &str) {
        self.props.insert("name".into(), name.into());
    }

    fn address(&self) -> Option<&Address> {
        self.props.get("address").and_then(Node::downcast_ref)
    }

    fn address_mut(&mut self) -> Option<&mut Address> {
        self.props.get_mut("address").and_then(Node::downcast_mut)
    }
}

impl_object!(Employee);

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lives at {}",
            prop_or_null(&self.props, "name"),
            prop_or_null(&self.props, "address"),
        )
    }
}

fn prop_or_null<'a>(props: &'a Props, key: &str) -> &'a dyn fmt::Display {
    match props.get(key) {
        Some(node) => node,
        None => &"null",
    }
}

// =============================================================================
// Milestone 4: Type registry
// =============================================================================

struct TypeDescriptor {
    name: &'static str,
    type_id: TypeId,
    construct: fn() -> Box<dyn Object>,
}

fn construct_default<T: Object + Default>() -> Box<dyn Object> {
    Box::new(T::default())
}

/// Ordered list of reconstructible types. A type's position is its
/// `typeIndex` in snapshots.
#[derive(Default)]
struct TypeRegistry {
    types: Vec<TypeDescriptor>,
}

impl TypeRegistry {
    fn new() -> Self {
        Self::default()
    }

    fn register<T: Object + Default>(mut self, name: &'static str) -> Result<Self, CloneError> {
        let type_id = TypeId::of::<T>();
        if self.types.iter().any(|t| t.type_id == type_id) {
            return Err(CloneError::DuplicateType { name });
        }
        if self.types.iter().any(|t| t.name == name) {
            return Err(CloneError::DuplicateName { name });
        }

        self.types.push(TypeDescriptor {
            name,
            type_id,
            construct: construct_default::<T>,
        });
        Ok(self)
    }

    fn index_of(&self, object: &dyn Object) -> Option<usize> {
        let type_id = object.as_any().type_id();
        self.types.iter().position(|t| t.type_id == type_id)
    }

    fn get(&self, index: usize) -> Option<&TypeDescriptor> {
        self.types.get(index)
    }

    fn len(&self) -> usize {
        self.types.len()
    }
}

// =============================================================================
// Milestone 5: Tag, flatten, reconstruct
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Key(String),
    Index(usize),
}

type NodePath = Vec<Segment>;

fn format_path(path: &[Segment]) -> String {
    let mut out = String::from("$");
    for segment in path {
        match segment {
            Segment::Key(key) => {
                out.push('.');
                out.push_str(key);
            }
            Segment::Index(index) => out.push_str(&format!("[{index}]")),
        }
    }
    out
}

/// Registry index of every registered node, keyed by its path from the root.
#[derive(Debug, Default)]
struct TagMap {
    tags: BTreeMap<NodePath, usize>,
}

impl TagMap {
    fn get(&self, path: &[Segment]) -> Option<usize> {
        self.tags.get(path).copied()
    }

    fn len(&self) -> usize {
        self.tags.len()
    }
}

struct Serializer {
    registry: TypeRegistry,
}

impl Serializer {
    fn new(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    /// Deep copy of `object`. Registered objects come back as instances of
    /// their own type, everything else as plain data.
    fn clone(&self, object: &Node) -> Result<Node, CloneError> {
        let tags = self.compute_tags(object);
        let tagged = self.apply_tags(object, &tags)?;
        let snapshot = flatten(&tagged)?;
        self.reconstruct(snapshot)
    }

    fn compute_tags(&self, root: &Node) -> TagMap {
        let mut tags = TagMap::default();
        let mut path = NodePath::new();
        self.mark_recursive(root, &mut path, &mut tags);
        tags
    }

    fn mark_recursive(&self, node: &Node, path: &mut NodePath, tags: &mut TagMap) {
        match node {
            Node::Object(object) => {
                if let Some(index) = self.registry.index_of(&**object) {
                    trace!(path = %format_path(path), type_index = index, "tagged node");
                    tags.tags.insert(path.clone(), index);
                }
                self.mark_props(object.props(), path, tags);
            }
            Node::Map(props) => self.mark_props(props, path, tags),
            Node::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    path.push(Segment::Index(index));
                    self.mark_recursive(item, path, tags);
                    path.pop();
                }
            }
            _ => {}
        }
    }

    fn mark_props(&self, props: &Props, path: &mut NodePath, tags: &mut TagMap) {
        for (key, child) in props {
            if child.is_null() {
                continue;
            }
            path.push(Segment::Key(key.clone()));
            self.mark_recursive(child, path, tags);
            path.pop();
        }
    }

    fn apply_tags(&self, root: &Node, tags: &TagMap) -> Result<Value, CloneError> {
        let mut path = NodePath::new();
        write_tagged(root, tags, &mut path)
    }

    fn reconstruct(&self, value: Value) -> Result<Node, CloneError> {
        Ok(match value {
            Value::Null => Node::Null,
            Value::Bool(flag) => Node::Bool(flag),
            Value::Number(number) => Node::Number(
                number
                    .as_f64()
                    .ok_or_else(|| CloneError::InvalidNumber(number.to_string()))?,
            ),
            Value::String(text) => Node::Text(text),
            Value::Array(items) => Node::List(
                items
                    .into_iter()
                    .map(|item| self.reconstruct(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(mut fields) => match fields.remove(TYPE_INDEX_KEY) {
                Some(tag) => self.reconstruct_instance(&tag, fields)?,
                None => Node::Map(
                    fields
                        .into_iter()
                        .map(|(key, child)| Ok((key, self.reconstruct(child)?)))
                        .collect::<Result<_, CloneError>>()?,
                ),
            },
        })
    }

    fn reconstruct_instance(
        &self,
        tag: &Value,
        fields: Map<String, Value>,
    ) -> Result<Node, CloneError> {
        let index = tag
            .as_u64()
            .and_then(|raw| usize::try_from(raw).ok())
            .ok_or_else(|| CloneError::InvalidTypeIndex(tag.to_string()))?;
        let descriptor = self
            .registry
            .get(index)
            .ok_or(CloneError::TypeIndexOutOfRange {
                index,
                len: self.registry.len(),
            })?;

        let mut object = (descriptor.construct)();
        for (key, child) in fields {
            if child.is_null() {
                continue;
            }
            let child = self.reconstruct(child)?;
            object.props_mut().insert(key, child);
        }

        trace!(type_name = descriptor.name, "reconstructed instance");
        Ok(Node::Object(object))
    }
}

fn write_tagged(node: &Node, tags: &TagMap, path: &mut NodePath) -> Result<Value, CloneError> {
    Ok(match node {
        Node::Null => Value::Null,
        Node::Bool(flag) => Value::Bool(*flag),
        Node::Number(number) => {
            Value::Number(Number::from_f64(*number).ok_or_else(|| CloneError::NonFiniteNumber {
                path: format_path(path),
            })?)
        }
        Node::Text(text) => Value::String(text.clone()),
        Node::List(items) => {
            let mut values = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(Segment::Index(index));
                values.push(write_tagged(item, tags, path)?);
                path.pop();
            }
            Value::Array(values)
        }
        Node::Map(props) => Value::Object(write_props(props, tags, path)?),
        Node::Object(object) => {
            let mut fields = write_props(object.props(), tags, path)?;
            if let Some(index) = tags.get(path) {
                fields.insert(TYPE_INDEX_KEY.to_string(), Value::from(index));
            }
            Value::Object(fields)
        }
    })
}

fn write_props(
    props: &Props,
    tags: &TagMap,
    path: &mut NodePath,
) -> Result<Map<String, Value>, CloneError> {
    if props.contains_key(TYPE_INDEX_KEY) {
        return Err(CloneError::ReservedKey {
            path: format_path(path),
        });
    }

    let mut fields = Map::new();
    for (key, child) in props {
        path.push(Segment::Key(key.clone()));
        let value = write_tagged(child, tags, path)?;
        path.pop();
        fields.insert(key.clone(), value);
    }
    Ok(fields)
}

/// Renders the tagged graph to text and parses it back, so nothing in the
/// result can alias the input.
///
/// The parse has no nesting limit; `serde_stacker` grows the stack on demand
/// so deep graphs round-trip instead of failing at 128 levels.
fn flatten(tagged: &Value) -> Result<Value, CloneError> {
    let text = serde_json::to_string(tagged)?;
    debug!(bytes = text.len(), "flattened tagged graph");

    let mut parser = serde_json::Deserializer::from_str(&text);
    parser.disable_recursion_limit();
    let snapshot = Value::deserialize(serde_stacker::Deserializer::new(&mut parser))?;
    parser.end()?;
    Ok(snapshot)
}

// =============================================================================
// Milestone 6: Office configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct OfficeAddress {
    street_address: String,
    city: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct OfficesConfig {
    main: OfficeAddress,
    aux: OfficeAddress,
}

impl Default for OfficesConfig {
    fn default() -> Self {
        Self {
            main: OfficeAddress {
                street_address: "123 East Drive".into(),
                city: "London".into(),
            },
            aux: OfficeAddress {
                street_address: "200 London Rd".into(),
                city: "Oxford".into(),
            },
        }
    }
}

impl OfficesConfig {
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Loads from `arg`, then `$OFFICES_CONFIG`, falling back to defaults.
    fn resolve(arg: Option<String>) -> Result<Self, ConfigError> {
        match config_path(arg) {
            Some(path) => {
                debug!(path = %path.display(), "loading offices config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

fn config_path(arg: Option<String>) -> Option<PathBuf> {
    arg.or_else(|| env::var(OFFICES_CONFIG_ENV).ok())
        .map(PathBuf::from)
}

// =============================================================================
// Milestone 7: Employee factory
// =============================================================================

/// Hands out employees cloned from one of two office prototypes. The
/// prototypes leave name and suite empty for the factory to fill in.
struct EmployeeFactory {
    serializer: Serializer,
    main: Node,
    aux: Node,
}

impl EmployeeFactory {
    fn new(config: &OfficesConfig) -> Result<Self, CloneError> {
        let registry = TypeRegistry::new()
            .register::<Employee>("Employee")?
            .register::<Address>("Address")?;

        Ok(Self {
            serializer: Serializer::new(registry),
            main: Self::prototype(&config.main),
            aux: Self::prototype(&config.aux),
        })
    }

    fn prototype(office: &OfficeAddress) -> Node {
        Node::object(Employee::new(
            None,
            Address::new(
                None,
                Some(office.street_address.as_str()),
                Some(office.city.as_str()),
            ),
        ))
    }

    fn new_main_office_employee(&self, name: &str, suite: u32) -> Result<Employee, CloneError> {
        self.new_employee(&self.main, name, suite)
    }

    fn new_aux_office_employee(&self, name: &str, suite: u32) -> Result<Employee, CloneError> {
        self.new_employee(&self.aux, name, suite)
    }

    fn new_employee(&self, proto: &Node, name: &str, suite: u32) -> Result<Employee, CloneError> {
        let mut employee = self
            .serializer
            .clone(proto)?
            .into_object::<Employee>()
            .ok_or(CloneError::WrongType {
                key: "$".into(),
                expected: "Employee",
            })?;

        employee.set_name(name);
        employee
            .address_mut()
            .ok_or(CloneError::WrongType {
                key: "address".into(),
                expected: "Address",
            })?
            .set_suite(suite);

        debug!(name, suite, "created employee from prototype");
        Ok(employee)
    }
}

// =============================================================================
// Example usage
// =============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    design_patterns::init_logging();

    let config = OfficesConfig::resolve(env::args().nth(1))?;
    let factory = EmployeeFactory::new(&config)?;

    println!("{}", "=== Prototype Factory ===".bold());
    let john = factory.new_main_office_employee("John", 4321)?;
    let jane = factory.new_aux_office_employee("Jane", 222)?;
    println!("{john}");
    println!("{jane}");

    println!("\n{}", "=== Cloning a Mixed Graph ===".bold());
    let mut notes = Props::new();
    notes.insert("topic".into(), "onboarding".into());
    let original = Node::List(vec![Node::object(john), Node::Map(notes)]);

    let mut copy = factory.serializer.clone(&original)?;
    if let Node::List(items) = &mut copy {
        if let Some(employee) = items.first_mut().and_then(Node::downcast_mut::<Employee>) {
            employee.set_name("John (copy)");
        }
    }
    println!("original: {}", original.content());
    println!("copy:     {}", copy.content().to_string().green());

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
