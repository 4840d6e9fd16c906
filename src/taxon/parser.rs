use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Canonical hybrid sign used in normalized names and group keys.
pub const HYBRID_SIGN: &str = "×";

// Any of these anywhere in the cleaned name marks it as a hybrid. The bare `x`
// also hits names like "Ilex"; that looseness is kept on purpose.
const HYBRID_MARKERS: [&str; 4] = ["×", "x", " x ", " × "];

// Known species misspellings and their corrections.
const SPECIES_CORRECTIONS: &[(&str, &str)] = &[
    ("japonicus", "japonica"),
    ("chinenses", "chinensis"),
    ("guarantica", "guaranitica"),
    ("tussilaginea", "tussilagina"),
    ("ilex", "Ilex"),
];

static PARENTHESES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[()]").expect("valid parentheses regex"));

static QUOTE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["`‘’“”]"#).expect("valid quote regex"));

static REPEATED_QUOTE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'{2,}").expect("valid repeated quote regex"));

static HYBRID_SIGN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*×\s*|(?:^|\s+)x(?:\s+|$)").expect("valid hybrid marker regex")
});

static CULTIVAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'[^']+'").expect("valid cultivar regex"));

static AUTHORITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+([A-Z][a-z.]+(?:\s+(?:ex|et)\s+[A-Z][a-z.]+)*)\s*$")
        .expect("valid authority regex")
});

static SUBSPECIES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bsubsp\.?\s+([a-z-]+)").expect("valid subspecies regex"));

static VARIETY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bvar\.?\s+([a-z-]+)").expect("valid variety regex"));

static FORMA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bf\.?\s+([a-z-]+)").expect("valid forma regex"));

/// Structured components of a single botanical name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotanicalNameParts {
    pub genus: String,
    pub species: Option<String>,
    pub subspecies: Option<String>,
    pub variety: Option<String>,
    pub forma: Option<String>,
    /// Cultivar epithet with its single quotes kept.
    pub cultivar: Option<String>,
    pub hybrid: bool,
    pub authority: Option<String>,
    pub correction_notes: Vec<String>,
}

impl BotanicalNameParts {
    /// Rebuilds the matching identity of the name. The authority is metadata
    /// and never part of it.
    pub fn normalize(&self) -> String {
        let mut parts: Vec<String> = vec![self.genus.clone()];

        if self.hybrid {
            parts.push(HYBRID_SIGN.to_string());
        }
        if let Some(species) = &self.species {
            parts.push(species.clone());
        }
        if let Some(subspecies) = &self.subspecies {
            parts.push(format!("subsp. {}", subspecies));
        }
        if let Some(variety) = &self.variety {
            parts.push(format!("var. {}", variety));
        }
        if let Some(forma) = &self.forma {
            parts.push(format!("f. {}", forma));
        }
        if let Some(cultivar) = &self.cultivar {
            parts.push(cultivar.clone());
        }

        parts.join(" ")
    }

    /// Key under which variants of "the same plant" are bucketed.
    pub fn group_key(&self) -> String {
        if self.hybrid {
            return format!("{} {}", self.genus, HYBRID_SIGN);
        }
        match &self.species {
            Some(species) => format!("{} {}", self.genus, species),
            None => self.genus.clone(),
        }
    }

    /// Copy with conventional Latin capitalisation: genus capitalised, epithets
    /// lower-cased. Cultivar, authority and corrected species are left verbatim.
    pub fn canonical_case(&self) -> Self {
        let lower = |value: &Option<String>| value.as_ref().map(|v| v.to_lowercase());
        let species = match &self.species {
            Some(species) if is_correction(species) => Some(species.clone()),
            other => lower(other),
        };
        Self {
            genus: capitalize(&self.genus),
            species,
            subspecies: lower(&self.subspecies),
            variety: lower(&self.variety),
            forma: lower(&self.forma),
            cultivar: self.cultivar.clone(),
            hybrid: self.hybrid,
            authority: self.authority.clone(),
            correction_notes: self.correction_notes.clone(),
        }
    }
}

/// Parses a raw botanical name. Never fails: anything that cannot be recognised
/// is simply left out of the result.
pub fn parse_botanical_name(raw: &str) -> BotanicalNameParts {
    let mut parts = BotanicalNameParts::default();
    let cleaned = clean(raw);

    parts.hybrid = HYBRID_MARKERS.iter().any(|marker| cleaned.contains(marker));
    let working = collapse_whitespace(&HYBRID_SIGN_REGEX.replace_all(&cleaned, " × "));

    let (cultivar, working) = extract(&CULTIVAR_REGEX, 0, working);
    parts.cultivar = cultivar;

    // The authority may never swallow the genus, as in "× Chitalpa".
    let (authority, working) = match extract(&AUTHORITY_REGEX, 1, working.clone()) {
        (Some(authority), residual) if has_genus_token(&residual) => (Some(authority), residual),
        _ => (None, working),
    };
    parts.authority = authority;

    let (subspecies, working) = extract(&SUBSPECIES_REGEX, 1, working);
    parts.subspecies = subspecies;

    let (variety, working) = extract(&VARIETY_REGEX, 1, working);
    parts.variety = variety;

    let (forma, working) = extract(&FORMA_REGEX, 1, working);
    parts.forma = forma;

    let mut tokens = working.split_whitespace().filter(|token| *token != HYBRID_SIGN);
    parts.genus = tokens.next().unwrap_or_default().to_string();

    if let Some(species) = tokens.next() {
        match corrected_species(species) {
            Some(corrected) => {
                debug!("Corrected species '{}' to '{}' in '{}'", species, corrected, raw);
                parts
                    .correction_notes
                    .push(format!("Species \"{}\" corrected to \"{}\"", species, corrected));
                parts.species = Some(corrected.to_string());
            }
            None => parts.species = Some(species.to_string()),
        }
    }

    trace!("Parsed '{}' as {:?}", raw, parts);
    parts
}

/// Whether a plant's botanical name equals a filter value once both are
/// normalized. Case-sensitive; an empty side never matches.
pub fn botanical_name_matches(plant_name: &str, filter_name: &str) -> bool {
    if plant_name.is_empty() || filter_name.is_empty() {
        return false;
    }
    parse_botanical_name(plant_name).normalize() == parse_botanical_name(filter_name).normalize()
}

/// Keeps the names that match `filter_name`, in their original order.
pub fn filter_matching<'a, S: AsRef<str>>(names: &'a [S], filter_name: &str) -> Vec<&'a str> {
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| botanical_name_matches(name, filter_name))
        .collect()
}

fn clean(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    let without_parens = PARENTHESES_REGEX.replace_all(&collapsed, "");
    let single_quoted = QUOTE_REGEX.replace_all(&without_parens, "'");
    REPEATED_QUOTE_REGEX.replace_all(&single_quoted, "'").into_owned()
}

/// Removes the first match of `regex` and returns capture `group` along with
/// the rest of the string.
fn extract(regex: &Regex, group: usize, working: String) -> (Option<String>, String) {
    let found = regex.captures(&working).and_then(|captures| {
        let whole = captures.get(0)?;
        let value = captures.get(group)?;
        Some((whole.range(), value.as_str().to_string()))
    });

    match found {
        Some((range, value)) => {
            let residual = format!("{} {}", &working[..range.start], &working[range.end..]);
            (Some(value), collapse_whitespace(&residual))
        }
        None => (None, working),
    }
}

fn has_genus_token(working: &str) -> bool {
    working.split_whitespace().any(|token| token != HYBRID_SIGN)
}

fn corrected_species(species: &str) -> Option<&'static str> {
    SPECIES_CORRECTIONS
        .iter()
        .find(|(wrong, _)| *wrong == species)
        .map(|(_, right)| *right)
}

fn is_correction(species: &str) -> bool {
    SPECIES_CORRECTIONS.iter().any(|(_, right)| *right == species)
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
