use std::{fmt, ops::Index, sync::Arc};

use itertools::Itertools;
use serde::{ser::SerializeMap, Serialize, Serializer};

use super::{
    error::{Error, Result},
    field::FieldName,
    schema::Schema,
};

/// One frozen row, read through the field names of its [`Schema`].
///
/// Records are only made by [`Schema::instantiate`] and expose no way to
/// change a value afterwards:
///
/// ```compile_fail
/// use std::sync::Arc;
/// use dynrec::domain::schema::Schema;
///
/// let schema = Arc::new(Schema::from_header(["a"]).unwrap());
/// let mut record = schema.instantiate(vec![1.0]).unwrap();
/// record["a"] = 2.0;
/// ```
///
/// Two records are equal when their field lists and values are equal, no
/// matter which schema instance they came from.
#[derive(Clone)]
pub struct Record<T = f64> {
    schema: Arc<Schema>,
    values: Box<[T]>,
}

impl<T> Record<T> {
    pub(crate) fn new(schema: Arc<Schema>, values: Box<[T]>) -> Self {
        Self { schema, values }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.schema
            .position(name)
            .map(|position| &self.values[position])
    }

    pub fn field(&self, name: &str) -> Result<&T> {
        self.get(name).ok_or_else(|| Error::UnknownField {
            name: name.to_string(),
        })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn names(&self) -> &[FieldName] {
        self.schema.names()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// `(name, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &T)> {
        self.schema.names().iter().zip(self.values.iter())
    }
}

impl<T> Index<&str> for Record<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the record type has no field called `name`.
    fn index(&self, name: &str) -> &T {
        match self.get(name) {
            Some(value) => value,
            None => panic!("record type has no field named `{name}`"),
        }
    }
}

impl<T: PartialEq> PartialEq for Record<T> {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.schema, &other.schema) || self.schema == other.schema)
            && self.values == other.values
    }
}

impl<T: fmt::Debug> fmt::Debug for Record<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(name, value)| (name.as_str(), value)))
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Record<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .join(", ");
        write!(f, "Record({fields})")
    }
}

impl<T: Serialize> Serialize for Record<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
