//! Parsed document structure.
//!
//! A Framsticks file is an ordered sequence of records. Each record opens
//! with a `ClassName:` header line and closes at the first blank line (or at
//! end of input). The reader materializes them as [`Object`]s inside a
//! [`Document`], both owned by the caller once parsing completes.

use crate::{Value, ValueMap};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// One record: a `ClassName:` header plus its property lines.
///
/// The property map always contains the `"class"` key, holding the header
/// string, and preserves the order in which keys were first assigned.
/// A repeated key overwrites its value in place.
///
/// # Examples
///
/// ```rust
/// use framsreader::from_str;
///
/// let doc = from_str("org:\nname:alice\nenergy:1.5\n").unwrap();
/// let obj = &doc[0];
/// assert_eq!(obj.class(), "org");
/// assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("alice"));
/// assert_eq!(obj.get("energy").and_then(|v| v.as_f64()), Some(1.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    properties: ValueMap,
}

impl Object {
    /// Creates an object for the given class header. The `"class"` property
    /// is the first entry of the map.
    #[must_use]
    pub fn new(class: &str) -> Self {
        let mut properties = ValueMap::new();
        properties.insert("class".to_string(), Value::String(class.to_string()));
        Object { properties }
    }

    /// The class header this object was opened with.
    #[must_use]
    pub fn class(&self) -> &str {
        self.properties
            .get("class")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Returns the value stored at `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Stores `value` at `key`, overwriting any previous value.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.properties.insert(key, value)
    }

    /// Returns `true` if a property with this key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Number of properties, including `"class"`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Always `false`: the `"class"` property is mandatory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates over key-value pairs in first-assignment order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.properties.iter()
    }

    /// Borrows the underlying property map.
    #[must_use]
    pub fn properties(&self) -> &ValueMap {
        &self.properties
    }
}

impl Serialize for Object {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.properties.serialize(serializer)
    }
}

/// An ordered sequence of [`Object`]s, in source order.
///
/// # Examples
///
/// ```rust
/// use framsreader::from_str;
///
/// let doc = from_str("a:\nx:1\n\nb:\ny:2\n").unwrap();
/// assert_eq!(doc.len(), 2);
/// let classes: Vec<_> = doc.iter().map(|o| o.class()).collect();
/// assert_eq!(classes, vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    objects: Vec<Object>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Document {
            objects: Vec::new(),
        }
    }

    /// Number of objects in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the document holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the object at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    /// Iterates over objects in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Object> {
        self.objects.iter()
    }

    /// Appends an object. Used by the record scanner.
    pub(crate) fn push(&mut self, object: Object) {
        self.objects.push(object);
    }

    /// Mutable access to the most recently opened object.
    pub(crate) fn last_mut(&mut self) -> Option<&mut Object> {
        self.objects.last_mut()
    }
}

impl std::ops::Index<usize> for Document {
    type Output = Object;

    fn index(&self, index: usize) -> &Object {
        &self.objects[index]
    }
}

impl IntoIterator for Document {
    type Item = Object;
    type IntoIter = std::vec::IntoIter<Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Object;
    type IntoIter = std::slice::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.objects.len()))?;
        for object in &self.objects {
            seq.serialize_element(object)?;
        }
        seq.end()
    }
}
