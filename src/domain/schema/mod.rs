use std::{collections::HashMap, sync::Arc};

use super::{
    error::{Error, Result},
    field::FieldName,
    record::Record,
};

/// The runtime-built record type: an ordered set of field names.
///
/// A schema is built once per load and shared by every [`Record`] made from
/// it through an [`Arc`]. Nothing can add, remove or rename a field after
/// construction.
#[derive(Debug)]
pub struct Schema {
    fields: Vec<FieldName>,
    positions: HashMap<FieldName, usize>,
}

impl Schema {
    pub fn new(fields: Vec<FieldName>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(fields.len());

        for (position, field) in fields.iter().enumerate() {
            if positions.insert(field.clone(), position).is_some() {
                return Err(Error::DuplicateField {
                    name: field.to_string(),
                });
            }
        }

        Ok(Self { fields, positions })
    }

    /// Build a schema straight from raw header cells.
    ///
    /// Sanitized names are always distinct, so this only fails if
    /// [`FieldName::sanitize_all`] ever stops guaranteeing that.
    pub fn from_header<I>(cells: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::new(FieldName::sanitize_all(cells))
    }

    /// Create a frozen record whose values line up with [`Schema::names`].
    pub fn instantiate<T>(self: &Arc<Self>, values: Vec<T>) -> Result<Record<T>> {
        if values.len() != self.fields.len() {
            return Err(Error::ArityMismatch {
                expected: self.fields.len(),
                found: values.len(),
            });
        }

        Ok(Record::new(Arc::clone(self), values.into_boxed_slice()))
    }

    pub fn names(&self) -> &[FieldName] {
        &self.fields
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Schema {}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> FieldName {
        FieldName::new(name).unwrap()
    }

    #[test]
    fn keeps_header_order() {
        let schema = Schema::from_header(["b", "a", "c"]).unwrap();

        assert_eq!(schema.names(), [field("b"), field("a"), field("c")]);
        assert_eq!(schema.position("a"), Some(1));
        assert_eq!(schema.position("z"), None);
        assert!(schema.contains("c"));
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn rejects_duplicate_fields() {
        let err = Schema::new(vec![field("a"), field("b"), field("a")]).unwrap_err();

        assert_eq!(err, Error::DuplicateField { name: "a".into() });
    }

    #[test]
    fn instantiate_checks_arity() {
        let schema = Arc::new(Schema::from_header(["a", "b"]).unwrap());

        assert_eq!(
            schema.instantiate(vec![1.0]).unwrap_err(),
            Error::ArityMismatch {
                expected: 2,
                found: 1
            }
        );
        assert!(schema.instantiate(vec![1.0, 2.0]).is_ok());
    }

    #[test]
    fn records_share_one_schema() {
        let schema = Arc::new(Schema::from_header(["a"]).unwrap());
        let first = schema.instantiate(vec![1.0]).unwrap();
        let second = schema.instantiate(vec![2.0]).unwrap();

        assert!(Arc::ptr_eq(first.schema(), second.schema()));
        assert_eq!(Arc::strong_count(&schema), 3);
    }

    #[test]
    fn schemas_compare_by_field_list() {
        let header = |cells: [&str; 2]| Schema::from_header(cells).unwrap();

        assert_eq!(header(["a", "b"]), header(["a", "b"]));
        assert_ne!(header(["a", "b"]), header(["b", "a"]));
    }

    #[test]
    fn header_with_repeated_cells_builds_a_valid_schema() {
        let schema = Schema::from_header(["1st", "field b", "1st"]).unwrap();

        assert_eq!(schema.position("F1st"), Some(0));
        assert_eq!(schema.position("field_b"), Some(1));
        assert_eq!(schema.position("F1st_2"), Some(2));
    }
}
