use serde::Serialize;

/// Per-document catalog of candidate phrases, keyed by feature
///
/// Entries keep their declaration order, which the ordering policy uses to
/// break ties. Inserting an existing feature again appends to its phrase list.
#[derive(Debug, Clone, Serialize)]
pub struct PhraseMapping<F> {
    entries: Vec<(F, Vec<String>)>,
}

impl<F> Default for PhraseMapping<F> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<F: PartialEq> PhraseMapping<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add phrases for a feature, keeping its first declaration position
    pub fn insert<I, S>(&mut self, feature: F, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases = phrases.into_iter().map(Into::into);
        match self.entries.iter_mut().find(|(f, _)| *f == feature) {
            Some((_, existing)) => existing.extend(phrases),
            None => self.entries.push((feature, phrases.collect())),
        }
    }

    /// Builder-style insert
    pub fn with<I, S>(mut self, feature: F, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(feature, phrases);
        self
    }

    /// Phrases listed for a feature; empty when the feature is absent
    pub fn phrases(&self, feature: &F) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| f == feature)
            .map(|(_, phrases)| phrases.as_slice())
            .unwrap_or(&[])
    }

    /// Declaration position of a feature in the mapping
    pub fn position(&self, feature: &F) -> Option<usize> {
        self.entries.iter().position(|(f, _)| f == feature)
    }

    /// Sum of the code-point lengths of every phrase listed for a feature
    pub fn total_phrase_chars(&self, feature: &F) -> usize {
        self.phrases(feature).iter().map(|p| p.chars().count()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&F, &[String])> {
        self.entries.iter().map(|(f, phrases)| (f, phrases.as_slice()))
    }

    /// Features in declaration order
    pub fn features(&self) -> impl Iterator<Item = &F> {
        self.entries.iter().map(|(f, _)| f)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F, S> FromIterator<(F, Vec<S>)> for PhraseMapping<F>
where
    F: PartialEq,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (F, Vec<S>)>>(iter: T) -> Self {
        let mut mapping = PhraseMapping::new();
        for (feature, phrases) in iter {
            mapping.insert(feature, phrases);
        }
        mapping
    }
}
