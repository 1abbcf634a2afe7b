use super::Record;

/// An intermediate representation of a reference collection which is not tied to a specific
/// format.
///
/// Records keep the order in which they appeared in the source text and can only be appended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Biblio {
    records: Vec<Record>,
}

impl Biblio {
    /// Create a new [`Biblio`] from a list of records.
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Append a [`Record`].
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Iterate the records in order of appearance.
    pub fn records(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// The number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the [`Biblio`] and returns the records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl FromIterator<Record> for Biblio {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Biblio {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Biblio {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
