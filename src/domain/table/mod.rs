use std::{slice, sync::Arc, vec};

use super::{error::Result, record::Record, schema::Schema};

/// Everything one load produces: the record type and its records, in file
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T = f64> {
    schema: Arc<Schema>,
    records: Vec<Record<T>>,
}

impl<T> Table<T> {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
            records: Vec::new(),
        }
    }

    pub fn push_row(&mut self, values: Vec<T>) -> Result<()> {
        let record = self.schema.instantiate(values)?;
        self.records.push(record);
        Ok(())
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn records(&self) -> &[Record<T>] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, Record<T>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> IntoIterator for Table<T> {
    type Item = Record<T>;
    type IntoIter = vec::IntoIter<Record<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a Record<T>;
    type IntoIter = slice::Iter<'a, Record<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
