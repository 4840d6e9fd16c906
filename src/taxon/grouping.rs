use crate::taxon::parser::{HYBRID_SIGN, parse_botanical_name};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One facet entry: every normalized spelling that shares a group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotanicalGroup {
    pub group_key: String,
    pub variants: Vec<String>,
    pub count: usize,
    pub is_hybrid: bool,
    /// 1 for a genus-only key, 2 for genus + species (or genus + ×).
    pub level: usize,
}

impl BotanicalGroup {
    fn new(group_key: String, variants: BTreeSet<String>) -> Self {
        let variants: Vec<String> = variants.into_iter().collect();
        Self {
            count: variants.len(),
            is_hybrid: group_key.contains(HYBRID_SIGN),
            level: group_key.split_whitespace().count(),
            group_key,
            variants,
        }
    }

    fn contains_term(&self, term: &str) -> bool {
        self.group_key.to_lowercase().contains(term)
            || self.variants.iter().any(|v| v.to_lowercase().contains(term))
    }
}

/// Groups whose key starts with the same letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterBucket {
    pub letter: String,
    pub groups: Vec<BotanicalGroup>,
}

/// Parses every non-empty name and buckets the normalized forms by group key.
/// Groups come back ordered by key, variants sorted and unique.
pub fn group_botanical_names<I, S>(names: I) -> Vec<BotanicalGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buckets: HashMap<String, BTreeSet<String>> = HashMap::new();
    let mut seen = 0usize;

    for name in names {
        let name = name.as_ref();
        if name.is_empty() {
            continue;
        }
        seen += 1;
        let parts = parse_botanical_name(name).canonical_case();
        buckets
            .entry(parts.group_key())
            .or_default()
            .insert(parts.normalize());
    }

    let mut groups: Vec<BotanicalGroup> = buckets
        .into_iter()
        .map(|(key, variants)| BotanicalGroup::new(key, variants))
        .collect();
    groups.sort_by(|a, b| collate(&a.group_key, &b.group_key));

    debug!("Grouped {} names into {} groups", seen, groups.len());
    groups
}

/// Keeps groups whose key or any variant contains `term`, ignoring case.
pub fn filter_groups(groups: Vec<BotanicalGroup>, term: &str) -> Vec<BotanicalGroup> {
    if term.is_empty() {
        return groups;
    }
    let term = term.to_lowercase();
    groups
        .into_iter()
        .filter(|group| group.contains_term(&term))
        .collect()
}

/// Buckets groups by the upper-cased first character of their key. The empty
/// key lands in the `""` bucket, which sorts first.
pub fn alphabetical_index(groups: &[BotanicalGroup]) -> Vec<LetterBucket> {
    let mut letters: BTreeMap<String, Vec<BotanicalGroup>> = BTreeMap::new();
    for group in groups {
        let letter = group
            .group_key
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_default();
        letters.entry(letter).or_default().push(group.clone());
    }

    letters
        .into_iter()
        .map(|(letter, groups)| LetterBucket { letter, groups })
        .collect()
}

// Case-insensitive first, then exact, so "abelia" and "Abelia" stay adjacent.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
