use indexmap::IndexMap;
use serde::Serialize;

/// Records stored in a [`Table`] expose their slug key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Insertion-ordered, read-only lookup table keyed by record slug.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Table<T> {
    entries: IndexMap<String, T>,
}

impl<T: Keyed> Table<T> {
    /// Builds a table from records in order.
    ///
    /// # Errors
    /// Returns the first key that appears more than once.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Result<Self, String> {
        let mut entries = IndexMap::new();
        for record in records {
            let key = record.key().to_string();
            if entries.contains_key(&key) {
                return Err(key);
            }
            entries.insert(key, record);
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Records in table order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = indexmap::map::Values<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Entry(&'static str);

    impl Keyed for Entry {
        fn key(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn preserves_insertion_order() {
        let table = Table::from_records([Entry("zeta"), Entry("alpha"), Entry("mid")])
            .expect("unique keys");

        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(table.len(), 3);
        assert!(table.get("alpha").is_some());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = Table::from_records([Entry("a"), Entry("b"), Entry("a")])
            .expect_err("duplicate should fail");
        assert_eq!(err, "a");
    }
}
