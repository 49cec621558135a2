// ============================================================
// Layer 3 — Transliteration and Ambiguity Analysis
// ============================================================
// Three mappings drive this module:
//
//   1. CANONICAL — each Cyrillic letter's single standard Latin
//      rendering ('ж' → "zh"). Used to produce model inputs and
//      to display words in Latin script.
//   2. VARIANTS — every Latin rendering a human might actually
//      type for a letter ('ч' → "ch" or "4"). Used offline to
//      enumerate all plausible spellings of a word.
//   3. REVERSE — the naive Latin → Cyrillic decoding a
//      mechanical reverse-transliterator would apply, longest
//      sequence first ("sht" → 'щ' before "sh" → 'ш').
//
// A spelling is AMBIGUOUS when a human could type it but the
// naive reverse decoding does not reconstruct the original
// word ("sapun" decodes to "сапун" fine; "maika" for "майка"
// decodes to "маика" — wrong). Collecting those spellings over
// the whole dictionary yields the disambiguation table the
// runtime correction lookup is built from.
//
// Character policy asymmetry (intentional — do not unify):
// transliteration passes unmapped characters through unchanged
// (display-time leniency for mixed-script text), while tensor
// encoding treats them as fatal (training-time strictness).
// See data/encoder.rs for the strict side.

// Canonical Cyrillic → Latin renderings, one per letter.
const CANONICAL: &[(char, &str)] = &[
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ж', "zh"),
    ('з', "z"),
    ('и', "i"),
    ('й', "y"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "sht"),
    ('ъ', "a"),
    ('ь', "y"),
    ('ю', "yu"),
    ('я', "ya"),
];

// All Latin renderings a person might use per letter, including
// the digit substitutions common in informal typing.
const VARIANTS: &[(char, &[&str])] = &[
    ('а', &["a"]),
    ('б', &["b"]),
    ('в', &["v", "w"]),
    ('г', &["g"]),
    ('д', &["d"]),
    ('е', &["e"]),
    ('ж', &["zh", "j"]),
    ('з', &["z"]),
    ('и', &["i"]),
    ('й', &["y", "j", "i"]),
    ('к', &["k"]),
    ('л', &["l"]),
    ('м', &["m"]),
    ('н', &["n"]),
    ('о', &["o"]),
    ('п', &["p"]),
    ('р', &["r"]),
    ('с', &["s"]),
    ('т', &["t"]),
    ('у', &["u"]),
    ('ф', &["f"]),
    ('х', &["h", "x"]),
    ('ц', &["ts", "c", "tz"]),
    ('ч', &["ch", "4"]),
    ('ш', &["sh", "6"]),
    ('щ', &["sht", "6t"]),
    ('ъ', &["a", "y", "u"]),
    ('ь', &["i", "j", "y"]),
    ('ю', &["yu", "iu", "ju", "u"]),
    ('я', &["ya", "ia", "ja", "q"]),
];

// Naive reverse decoding, ordered longest-sequence-first so the
// greedy scanner prefers "sht" over "sh" + "t". Where the
// canonical map collides ('а' and 'ъ' both render as "a"), the
// reverse direction picks the plain letter — which is exactly
// what makes 'ъ' and 'ь' words ambiguous.
const REVERSE: &[(&str, char)] = &[
    ("sht", 'щ'),
    ("zh", 'ж'),
    ("ts", 'ц'),
    ("ch", 'ч'),
    ("sh", 'ш'),
    ("yu", 'ю'),
    ("ya", 'я'),
    ("a", 'а'),
    ("b", 'б'),
    ("v", 'в'),
    ("g", 'г'),
    ("d", 'д'),
    ("e", 'е'),
    ("z", 'з'),
    ("i", 'и'),
    ("y", 'й'),
    ("k", 'к'),
    ("l", 'л'),
    ("m", 'м'),
    ("n", 'н'),
    ("o", 'о'),
    ("p", 'п'),
    ("r", 'р'),
    ("s", 'с'),
    ("t", 'т'),
    ("u", 'у'),
    ("f", 'ф'),
    ("h", 'х'),
];

/// Canonical character-by-character transliteration.
/// Characters without a mapping pass through unchanged, so
/// mixed-script input stays readable.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match CANONICAL.iter().find(|(cyr, _)| *cyr == c) {
            Some((_, lat)) => out.push_str(lat),
            None           => out.push(c),
        }
    }
    out
}

/// Naive greedy reverse transliteration of a Latin spelling.
/// At each position the longest matching Latin sequence wins;
/// unmapped characters pass through unchanged.
pub fn reverse_transliterate(text: &str) -> String {
    let mut out  = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match REVERSE.iter().find(|(lat, _)| rest.starts_with(lat)) {
            Some((lat, cyr)) => {
                out.push(*cyr);
                rest = &rest[lat.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

/// Every combinatorial Latin spelling of a Cyrillic word: the
/// cartesian product over each character's variant set.
///
/// Exponential in word length (branching factor up to 4), which
/// is fine — this runs once offline over a bounded dictionary,
/// never at serving time.
pub fn enumerate_variants(word: &str) -> Vec<String> {
    let mut spellings = vec![String::new()];

    for c in word.chars() {
        let options: Vec<String> = match VARIANTS.iter().find(|(cyr, _)| *cyr == c) {
            Some((_, opts)) => opts.iter().map(|s| s.to_string()).collect(),
            // No variant set — the character represents itself
            None => vec![c.to_string()],
        };

        spellings = options
            .iter()
            .flat_map(|opt| {
                spellings
                    .iter()
                    .map(move |prefix| format!("{prefix}{opt}"))
            })
            .collect();
    }

    spellings
}

// ─── AmbiguousSpelling ────────────────────────────────────────────────────────
/// One Latin spelling a human might type that a mechanical
/// reverse-transliterator would decode incorrectly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousSpelling {
    /// The human-typed Latin rendering
    pub spelling: String,

    /// The Cyrillic word the human meant
    pub original: String,

    /// What naive reverse decoding actually produces
    pub reconstruction: String,
}

/// All variant spellings of `word` whose naive reverse decoding
/// fails to reproduce the word. An empty result means every
/// plausible spelling of this word decodes correctly.
pub fn ambiguous_spellings(word: &str) -> Vec<AmbiguousSpelling> {
    enumerate_variants(word)
        .into_iter()
        .filter_map(|spelling| {
            let reconstruction = reverse_transliterate(&spelling);
            if reconstruction != word {
                Some(AmbiguousSpelling {
                    spelling,
                    original: word.to_string(),
                    reconstruction,
                })
            } else {
                None
            }
        })
        .collect()
}

// ─── DisambiguationTable ──────────────────────────────────────────────────────
/// Aggregation of all ambiguous spellings over a word corpus.
/// Keys are spellings; values are the Cyrillic words a spelling
/// could represent, ordered by first occurrence in the corpus.
/// Spellings for which reverse decoding is already correct never
/// appear as keys.
#[derive(Debug, Clone, Default)]
pub struct DisambiguationTable {
    entries: Vec<TableEntry>,
    index:   std::collections::HashMap<String, usize>,
    /// Total number of (spelling, word) ambiguity pairs seen,
    /// before grouping by spelling.
    pub pair_count: usize,
}

#[derive(Debug, Clone)]
pub struct TableEntry {
    pub spelling:   String,
    pub candidates: Vec<String>,
}

impl DisambiguationTable {
    pub fn build(words: &[String]) -> Self {
        let mut table = Self::default();

        for word in words {
            for amb in ambiguous_spellings(word) {
                table.pair_count += 1;
                match table.index.get(&amb.spelling) {
                    Some(&i) => table.entries[i].candidates.push(amb.original),
                    None => {
                        table.index.insert(amb.spelling.clone(), table.entries.len());
                        table.entries.push(TableEntry {
                            spelling:   amb.spelling,
                            candidates: vec![amb.original],
                        });
                    }
                }
            }
        }

        table
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, spelling: &str) -> Option<&[String]> {
        self.index
            .get(spelling)
            .map(|&i| self.entries[i].candidates.as_slice())
    }

    /// Spellings claimed by more than one distinct original word —
    /// the genuinely multi-candidate ambiguities that no lookup
    /// table alone can resolve.
    pub fn multi_candidate(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter().filter(|e| e.candidates.len() > 1)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterate_basic() {
        assert_eq!(transliterate("дума"), "duma");
        assert_eq!(transliterate("щъркел"), "shtarkel");
    }

    #[test]
    fn test_transliterate_passes_unknown_through() {
        // Display-time leniency: the digit survives unchanged
        assert_eq!(transliterate("та6"), "ta6");
    }

    #[test]
    fn test_reverse_prefers_longest_match() {
        // "sht" must decode as 'щ', not 'ш' + 'т'
        assert_eq!(reverse_transliterate("shtab"), "щаб");
        assert_eq!(reverse_transliterate("zhaba"), "жаба");
    }

    #[test]
    fn test_reverse_passes_unknown_through() {
        assert_eq!(reverse_transliterate("4as"), "4ас");
    }

    #[test]
    fn test_enumerate_single_variant_letters() {
        assert_eq!(enumerate_variants("аб"), vec!["ab"]);
    }

    #[test]
    fn test_enumerate_branches() {
        let mut got = enumerate_variants("ей");
        got.sort();
        assert_eq!(got, vec!["ei", "ej", "ey"]);
    }

    #[test]
    fn test_enumerate_count_is_product_of_branching() {
        // х has 2 variants, ю has 4 → 8 spellings
        assert_eq!(enumerate_variants("хю").len(), 8);
    }

    #[test]
    fn test_unambiguous_word_has_no_ambiguous_spellings_for_canonical() {
        // "дума" → only spelling "duma", which decodes straight back
        assert!(ambiguous_spellings("дума").is_empty());
    }

    #[test]
    fn test_hard_sign_word_is_ambiguous() {
        // Every spelling of "ъгъл" fails naive reverse decoding:
        // "agal" decodes to "агал", "ugul" to "угул", and so on.
        let ambs = ambiguous_spellings("ъгъл");
        assert_eq!(ambs.len(), enumerate_variants("ъгъл").len());
        assert!(ambs.iter().all(|a| a.reconstruction != "ъгъл"));
    }

    #[test]
    fn test_table_groups_candidates_by_first_occurrence() {
        // "мъка" ('ъ' typed as 'u') and "мюка" ('ю' typed as 'u')
        // collide on the spelling "muka", and naive decoding gets
        // both wrong ("muka" → "мука").
        let words = vec!["мъка".to_string(), "мюка".to_string()];
        let table = DisambiguationTable::build(&words);
        let candidates = table.get("muka").unwrap();
        assert_eq!(candidates, ["мъка", "мюка"]);

        let muka: Vec<_> = table
            .multi_candidate()
            .filter(|e| e.spelling == "muka")
            .collect();
        assert_eq!(muka.len(), 1);
    }

    #[test]
    fn test_table_excludes_unambiguous_spellings() {
        let words = vec!["дума".to_string()];
        let table = DisambiguationTable::build(&words);
        assert!(table.is_empty());
    }
}
