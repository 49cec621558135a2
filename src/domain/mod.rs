// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// The heart of the application — pure Rust types and functions
// that define what the system talks about: alphabets, words,
// and transliteration.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO tensor math or model code
//   - File I/O only through the WordSource trait boundary
//
// Why keep this layer pure?
//   - Easy to unit test (no GPU needed)
//   - Easy to understand (no framework noise)
//   - The ambiguity analysis and encoding rules are the part
//     of this system most worth getting exactly right

// Fixed character vocabularies and sequence-length constants
pub mod vocab;

// The dictionary-derived word corpus
pub mod corpus;

// Transliteration maps, variant enumeration, ambiguity analysis
pub mod translit;
