use crate::error::{KeyParetoError, KpResult};
use crate::scorer::BigramModel;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Word -> occurrence count for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    name: String,
    words: Vec<(String, u64)>,
}

impl Corpus {
    /// Keeps every word exactly as typed; repeated words add up. Words end
    /// up ordered alphabetically.
    pub fn from_pairs<I, S>(name: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut merged: BTreeMap<String, u64> = BTreeMap::new();
        for (word, count) in pairs {
            let slot = merged.entry(word.as_ref().to_string()).or_default();
            *slot = slot.saturating_add(count);
        }
        Self {
            name: name.to_string(),
            words: merged.into_iter().collect(),
        }
    }

    /// Lower-cases every word, merging counts of words that collide.
    pub fn fold_case(&self) -> Self {
        Self::from_pairs(
            &self.name,
            self.words.iter().map(|(w, c)| (w.to_lowercase(), *c)),
        )
    }

    /// Reads a JSON object (`{"word": count}`) or, for any other
    /// extension, a `word<TAB>count` file.
    pub fn load<P: AsRef<Path>>(path: P, name: &str) -> KpResult<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        info!("📂 Loading corpus '{}' from {}", name, path.display());
        let corpus = if is_json {
            Self::load_json(path, name)?
        } else {
            Self::load_tsv(path, name)?
        };

        if corpus.is_empty() {
            return Err(KeyParetoError::EmptyCorpus(name.to_string()));
        }
        info!(
            "   -> {} words, {} occurrences",
            corpus.len(),
            corpus.total_count()
        );
        Ok(corpus)
    }

    pub fn load_json<P: AsRef<Path>>(path: P, name: &str) -> KpResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KeyParetoError::Config(format!(
                "Could not open corpus at '{}': {}",
                path.display(),
                e
            ))
        })?;
        let raw: HashMap<String, u64> = serde_json::from_str(&content)?;
        Ok(Self::from_pairs(name, raw))
    }

    pub fn load_tsv<P: AsRef<Path>>(path: P, name: &str) -> KpResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            KeyParetoError::Config(format!(
                "Could not open corpus at '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(file);

        let mut pairs = Vec::new();
        let mut skipped = 0usize;

        for result in rdr.records() {
            let rec = result?;
            if rec.len() < 2 {
                skipped += 1;
                continue;
            }
            match rec[1].trim().parse::<u64>() {
                Ok(count) => pairs.push((rec[0].to_string(), count)),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(
                "⚠️  Skipped {} invalid rows in corpus '{}'",
                skipped,
                path.display()
            );
        }

        Ok(Self::from_pairs(name, pairs))
    }

    /// Writes the words as a JSON object in their current order.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> KpResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &OrderedCounts(&self.words))?;
        writer.flush()?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[(String, u64)] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        self.words
            .iter()
            .fold(0u64, |acc, (_, c)| acc.saturating_add(*c))
    }

    pub fn bigram_model(&self) -> KpResult<BigramModel> {
        BigramModel::from_words(
            &self.name,
            self.words.iter().map(|(w, c)| (w.as_str(), *c)),
        )
    }
}

struct OrderedCounts<'a>(&'a [(String, u64)]);

impl Serialize for OrderedCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

/// Mixes two corpora: every count is scaled by its percentage and
/// truncated, shared words add up, zero counts are dropped. The result is
/// ordered by descending count, then by word.
pub fn blend(a: &Corpus, pct_a: f64, b: &Corpus, pct_b: f64) -> KpResult<Corpus> {
    for pct in [pct_a, pct_b] {
        if !pct.is_finite() || pct < 0.0 {
            return Err(KeyParetoError::Config(format!(
                "Blend percentages must be non-negative, got {}",
                pct
            )));
        }
    }
    if (pct_a + pct_b - 100.0).abs() > f64::EPSILON {
        warn!(
            "⚠️  Percentages {} + {} do not add up to 100",
            pct_a, pct_b
        );
    }

    let scale = |count: u64, pct: f64| (count as f64 * pct / 100.0) as u64;

    let mut merged: HashMap<&str, u64> = HashMap::new();
    for (word, count) in &a.words {
        let slot = merged.entry(word.as_str()).or_default();
        *slot = slot.saturating_add(scale(*count, pct_a));
    }
    for (word, count) in &b.words {
        let slot = merged.entry(word.as_str()).or_default();
        *slot = slot.saturating_add(scale(*count, pct_b));
    }

    let mut words: Vec<(String, u64)> = merged
        .into_iter()
        .filter(|(_, c)| *c > 0)
        .map(|(w, c)| (w.to_string(), c))
        .collect();
    words.sort_by(|x, y| y.1.cmp(&x.1).then_with(|| x.0.cmp(&y.0)));

    Ok(Corpus {
        name: format!("{}{}-{}{}", a.name, pct_a as u64, b.name, pct_b as u64),
        words,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_keeps_words_as_typed() {
        let corpus = Corpus::from_pairs("en", [("The", 3), ("the", 2), ("the", 1)]);
        assert_eq!(
            corpus.words(),
            &[("The".to_string(), 3), ("the".to_string(), 3)]
        );
    }

    #[test]
    fn test_fold_case_merges_collisions() {
        let corpus = Corpus::from_pairs("en", [("The", 3), ("the", 2), ("ÄITI", 1)]);
        let folded = corpus.fold_case();
        assert_eq!(
            folded.words(),
            &[("the".to_string(), 5), ("äiti".to_string(), 1)]
        );
        assert_eq!(folded.name(), "en");
    }

    #[test]
    fn test_blend_scales_and_merges() {
        let en = Corpus::from_pairs("english", [("the", 100), ("on", 10)]);
        let fi = Corpus::from_pairs("finnish", [("on", 50), ("ja", 1)]);

        let mixed = blend(&en, 90.0, &fi, 10.0).unwrap();

        // "ja" scales to 0.1 and is dropped; "on" = 9 + 5.
        assert_eq!(
            mixed.words(),
            &[("the".to_string(), 90), ("on".to_string(), 14)]
        );
        assert_eq!(mixed.name(), "english90-finnish10");
    }

    #[test]
    fn test_blend_rejects_negative() {
        let en = Corpus::from_pairs("english", [("the", 100)]);
        assert!(blend(&en, -1.0, &en, 101.0).is_err());
    }

    #[test]
    fn test_bigram_model_matches_words() {
        let corpus = Corpus::from_pairs("en", [("ab", 1)]);
        assert_eq!(corpus.bigram_model().unwrap().total_length(), 3);
    }
}
