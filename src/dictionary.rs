use std::collections::BTreeMap;

/// Reasons a [`WordIndex`] cannot be built.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DictionaryError {
    /// No usable word survived filtering; nothing can be generated or solved.
    Empty,
}

/// An immutable mapping from word length to the candidate words of that length.
///
/// Built once and shared read-only by both the generator and the solver. Buckets are
/// sorted and deduplicated at build time, so [`by_length`](Self::by_length) enumerates
/// in an order that is stable across instances and runs; the search algorithms rely on
/// this for reproducible behavior.
pub struct WordIndex {
    by_length: BTreeMap<usize, Vec<String>>,
}

impl WordIndex {
    /// Build an index from raw words.
    ///
    /// Entries that are empty or not purely ASCII-alphabetic are dropped; the rest are
    /// normalized to lowercase. Word sources are expected to have filtered already, but
    /// untrusted input must not corrupt the constraint model.
    pub fn build<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_length: BTreeMap<usize, Vec<String>> = BTreeMap::new();

        for word in words {
            let word = word.as_ref();
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            let word = word.to_ascii_lowercase();
            by_length.entry(word.len()).or_default().push(word);
        }

        if by_length.is_empty() {
            return Err(DictionaryError::Empty);
        }

        for bucket in by_length.values_mut() {
            bucket.sort_unstable();
            bucket.dedup();
        }

        Ok(Self { by_length })
    }

    /// All known words of exactly length `len`, in stable enumeration order.
    pub fn by_length(&self, len: usize) -> &[String] {
        self.by_length.get(&len).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The distinct word lengths present, in increasing order.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_length.keys().copied()
    }

    /// Total number of indexed words.
    pub fn len(&self) -> usize {
        self.by_length.values().map(Vec::len).sum()
    }

    /// Whether the index holds no words. Always `false` for a successfully built index.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
