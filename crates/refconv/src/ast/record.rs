use indexmap::IndexMap;

/// A single bibliographic reference as an ordered mapping of field names to text values.
///
/// Field names are normalized to lowercase on insert and no schema is enforced, so any field
/// present in the source is carried through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Create an empty [`Record`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, lowercasing the name.
    ///
    /// When the name is already present the old value is replaced but the field keeps its
    /// original position.
    pub fn insert<K, V>(&mut self, name: K, value: V)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        self.fields.insert(name.as_ref().to_lowercase(), value.into());
    }

    /// Get the value of a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Iterate the fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}
