use crate::error::{CompressError, Result};
use ahash::AHashSet as HashSet;
use std::fmt;

/// A compact code standing in for one frequent itemset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Wraps an already-rendered code, e.g. one read back from disk.
    pub fn new(code: impl Into<String>) -> Self {
        Symbol(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What to do once every single letter has been handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Continue with longer codes: `A..Z, AA..AZ, BA.., ZZ, AAA..`
    #[default]
    MultiCharacter,
    /// Fail with [`CompressError::AlphabetExhausted`].
    Reject,
}

/// Ordered set of letters used to name itemsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolAlphabet {
    letters: Vec<char>,
    overflow: OverflowPolicy,
}

/// Characters the text format uses as separators.
pub(crate) fn is_reserved(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == ':'
}

impl SymbolAlphabet {
    /// Builds an alphabet from distinct, non-separator characters.
    pub fn new<I: IntoIterator<Item = char>>(letters: I) -> Result<Self> {
        let letters: Vec<char> = letters.into_iter().collect();

        if letters.is_empty() {
            return Err(CompressError::InvalidAlphabet {
                detail: "alphabet is empty".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(letters.len());
        for &c in &letters {
            if is_reserved(c) {
                return Err(CompressError::InvalidAlphabet {
                    detail: format!("'{}' is reserved by the dataset format", c.escape_debug()),
                });
            }
            if !seen.insert(c) {
                return Err(CompressError::InvalidAlphabet {
                    detail: format!("'{c}' appears more than once"),
                });
            }
        }

        Ok(Self {
            letters,
            overflow: OverflowPolicy::default(),
        })
    }

    /// `A` through `Z`.
    pub fn uppercase() -> Self {
        Self {
            letters: ('A'..='Z').collect(),
            overflow: OverflowPolicy::default(),
        }
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Number of single-letter symbols.
    pub fn base(&self) -> usize {
        self.letters.len()
    }

    /// Number of symbols available, or `None` if unbounded.
    pub fn capacity(&self) -> Option<usize> {
        match self.overflow {
            OverflowPolicy::MultiCharacter => None,
            OverflowPolicy::Reject => Some(self.letters.len()),
        }
    }

    /// Returns the symbol for the `index`-th itemset in assignment order.
    ///
    /// Codes are bijective base-N numerals, so they sort by length group and
    /// never repeat.
    pub fn symbol_for(&self, index: usize) -> Result<Symbol> {
        let base = self.letters.len();

        if self.overflow == OverflowPolicy::Reject && index >= base {
            return Err(CompressError::AlphabetExhausted {
                required: index + 1,
                capacity: base,
            });
        }

        let mut code = Vec::new();
        let mut rest = index;
        loop {
            code.push(self.letters[rest % base]);
            if rest < base {
                break;
            }
            rest = rest / base - 1;
        }
        code.reverse();

        Ok(Symbol(code.into_iter().collect()))
    }

    /// Checks up front that `count` symbols can be assigned.
    pub fn ensure_room(&self, count: usize) -> Result<()> {
        match self.capacity() {
            Some(capacity) if count > capacity => Err(CompressError::AlphabetExhausted {
                required: count,
                capacity,
            }),
            _ => Ok(()),
        }
    }
}

impl Default for SymbolAlphabet {
    fn default() -> Self {
        Self::uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(alphabet: &SymbolAlphabet, index: usize) -> String {
        alphabet.symbol_for(index).unwrap().as_str().to_string()
    }

    #[test]
    fn test_single_letters() {
        let alphabet = SymbolAlphabet::uppercase();
        assert_eq!(code(&alphabet, 0), "A");
        assert_eq!(code(&alphabet, 1), "B");
        assert_eq!(code(&alphabet, 25), "Z");
    }

    #[test]
    fn test_multi_character_overflow() {
        let alphabet = SymbolAlphabet::uppercase();
        assert_eq!(code(&alphabet, 26), "AA");
        assert_eq!(code(&alphabet, 27), "AB");
        assert_eq!(code(&alphabet, 51), "AZ");
        assert_eq!(code(&alphabet, 52), "BA");
        assert_eq!(code(&alphabet, 701), "ZZ");
        assert_eq!(code(&alphabet, 702), "AAA");
    }

    #[test]
    fn test_codes_unique() {
        let alphabet = SymbolAlphabet::new(['x', 'y']).unwrap();
        let codes: HashSet<String> = (0..200).map(|i| code(&alphabet, i)).collect();
        assert_eq!(codes.len(), 200);
    }

    #[test]
    fn test_reject_policy() {
        let alphabet = SymbolAlphabet::uppercase().with_overflow(OverflowPolicy::Reject);
        assert_eq!(code(&alphabet, 25), "Z");

        let err = alphabet.symbol_for(26).unwrap_err();
        assert!(matches!(
            err,
            CompressError::AlphabetExhausted {
                required: 27,
                capacity: 26
            }
        ));
        assert!(alphabet.ensure_room(26).is_ok());
        assert!(alphabet.ensure_room(27).is_err());
    }

    #[test]
    fn test_invalid_alphabets() {
        assert!(SymbolAlphabet::new(Vec::new()).is_err());
        assert!(SymbolAlphabet::new(['A', 'B', 'A']).is_err());
        assert!(SymbolAlphabet::new(['A', ' ']).is_err());
        assert!(SymbolAlphabet::new(['A', ',']).is_err());
        assert!(SymbolAlphabet::new(['A', ':']).is_err());
        assert!(SymbolAlphabet::new(['α', 'β']).is_ok());
    }
}
