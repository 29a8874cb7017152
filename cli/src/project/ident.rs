//! # Object Identifiers
//!
//! File: cli/src/project/ident.rs
//!
//! Every object in a project document is keyed by a 24-character uppercase
//! hexadecimal identifier. `IdGenerator` hands them out for one generation
//! run and remembers what it issued, so two objects in the same document
//! never share a key. Identifiers carry no meaning and are not stable
//! across runs.
//!
//! The random source is a ULID: a 48-bit millisecond timestamp followed by
//! 80 random bits. Keeping the top 96 bits gives identifiers from one run a
//! shared time prefix, much like the ones Xcode writes itself.
//!
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;
use ulid::Ulid;

/// Length of an identifier in hex characters (96 bits).
pub const IDENTIFIER_LEN: usize = 24;

/// An opaque object key, always `IDENTIFIER_LEN` uppercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Keeps the top 96 bits of a 128-bit value.
    pub fn from_bits(bits: u128) -> Self {
        let mut hex = format!("{:032X}", bits);
        hex.truncate(IDENTIFIER_LEN);
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `text` is exactly 24 characters of `0-9A-F`.
pub fn is_identifier(text: &str) -> bool {
    text.len() == IDENTIFIER_LEN
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

/// Supplies raw random values for identifiers.
pub trait IdSource {
    fn draw(&mut self) -> u128;
}

/// Fresh ULIDs as the identifier source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSource;

impl IdSource for RandomSource {
    fn draw(&mut self) -> u128 {
        Ulid::new().0
    }
}

/// Issues identifiers that are distinct within one generator.
#[derive(Debug)]
pub struct IdGenerator<S: IdSource = RandomSource> {
    source: S,
    issued: HashSet<Identifier>,
}

impl IdGenerator<RandomSource> {
    pub fn random() -> Self {
        Self::with_source(RandomSource)
    }
}

impl<S: IdSource> IdGenerator<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            issued: HashSet::new(),
        }
    }

    /// Returns a fresh identifier, redrawing on the (unlikely) collision.
    pub fn next_id(&mut self) -> Identifier {
        loop {
            let candidate = Identifier::from_bits(self.source.draw());
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            debug!("Identifier collision on {}, drawing again", candidate);
        }
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}
