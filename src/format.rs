//! Plain-text layout for a compressed dataset.
//!
//! ```text
//! Compressed Dataset:
//! Transaction 1: A C E
//! Transaction 2: C E d
//!
//! Mapping:
//! A: c
//! C: b
//! E: a
//! ```
//!
//! Transactions list their symbols in assignment order, then their leftover
//! items. Mapping lines are sorted by symbol and list items comma-separated.
//! When reading, a dataset token is a symbol if the mapping defines it and an
//! item otherwise.

use crate::compressor::CompressedDataset;
use crate::encoder::{CompressedTransaction, SymbolTable};
use crate::error::{CompressError, Result};
use crate::itemset::Itemset;
use crate::symbol::{is_reserved, Symbol};
use ahash::AHashSet as HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const DATASET_HEADER: &str = "Compressed Dataset:";
const MAPPING_HEADER: &str = "Mapping:";
const TRANSACTION_LABEL: &str = "Transaction";

/// Writes `dataset` in the text layout.
///
/// Fails without writing anything if a symbol code is empty or holds a
/// separator, or if an item renders empty, contains whitespace or `,`, or
/// collides with a symbol.
pub fn write_compressed<W, T>(mut writer: W, dataset: &CompressedDataset<T>) -> Result<()>
where
    W: Write,
    T: Display + Hash + Ord + Clone,
{
    let symbols: HashSet<&str> = dataset.symbols.symbols().map(Symbol::as_str).collect();
    if let Some(bad) = symbols
        .iter()
        .find(|code| code.is_empty() || code.contains(is_reserved))
    {
        return Err(CompressError::UnrepresentableSymbol {
            symbol: bad.to_string(),
        });
    }
    let check = |item: &T| -> Result<String> {
        let text = item.to_string();
        if text.is_empty()
            || text.contains(|c: char| c.is_whitespace() || c == ',')
            || symbols.contains(text.as_str())
        {
            return Err(CompressError::UnrepresentableItem { item: text });
        }
        Ok(text)
    };

    let mut lines = Vec::with_capacity(dataset.transactions.len());
    for transaction in &dataset.transactions {
        let mut tokens: Vec<String> = transaction
            .symbols
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        for item in &transaction.leftovers {
            tokens.push(check(item)?);
        }
        lines.push(tokens.join(" "));
    }

    let mut mapping: Vec<(&Symbol, &Itemset<T>)> = dataset.symbols.iter().collect();
    mapping.sort_by(|a, b| a.0.cmp(b.0));
    let mut mapping_lines = Vec::with_capacity(mapping.len());
    for (symbol, itemset) in mapping {
        let items = itemset.iter().map(&check).collect::<Result<Vec<_>>>()?;
        mapping_lines.push(format!("{}: {}", symbol, items.join(", ")));
    }

    writeln!(writer, "{DATASET_HEADER}")?;
    for (idx, line) in lines.iter().enumerate() {
        writeln!(writer, "{TRANSACTION_LABEL} {}: {}", idx + 1, line)?;
    }
    writeln!(writer)?;
    writeln!(writer, "{MAPPING_HEADER}")?;
    for line in &mapping_lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;

    debug!(
        transactions = lines.len(),
        symbols = mapping_lines.len(),
        "wrote compressed dataset"
    );
    Ok(())
}

fn malformed(line: usize, detail: impl Into<String>) -> CompressError {
    let detail = detail.into();
    warn!(line, %detail, "malformed compressed dataset");
    CompressError::MalformedMapping { line, detail }
}

#[derive(PartialEq)]
enum Section {
    Start,
    Dataset,
    Mapping,
}

/// Reads a dataset written by [`write_compressed`].
pub fn read_compressed<R: BufRead>(reader: R) -> Result<CompressedDataset<String>> {
    let mut section = Section::Start;
    let mut raw_transactions: Vec<Vec<String>> = Vec::new();
    let mut entries: Vec<(Symbol, Itemset<String>)> = Vec::new();
    let mut seen = HashSet::new();
    let mut line_no = 0;

    for line in reader.lines() {
        let line = line?;
        line_no += 1;
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        match section {
            Section::Start => {
                if line.trim() != DATASET_HEADER {
                    return Err(malformed(line_no, format!("expected '{DATASET_HEADER}'")));
                }
                section = Section::Dataset;
            }
            Section::Dataset => {
                if line.trim() == MAPPING_HEADER {
                    section = Section::Mapping;
                    continue;
                }
                raw_transactions.push(parse_transaction(line, line_no)?);
            }
            Section::Mapping => {
                let (symbol, itemset) = parse_mapping(line, line_no)?;
                if !seen.insert(symbol.clone()) {
                    return Err(malformed(line_no, format!("symbol '{symbol}' defined twice")));
                }
                entries.push((symbol, itemset));
            }
        }
    }

    if section != Section::Mapping {
        return Err(malformed(line_no + 1, format!("missing '{MAPPING_HEADER}' section")));
    }

    let symbols = SymbolTable::from_entries(entries);
    let transactions = raw_transactions
        .into_iter()
        .map(|tokens| {
            let mut compressed = CompressedTransaction {
                symbols: Vec::new(),
                leftovers: Vec::new(),
            };
            for token in tokens {
                let symbol = Symbol::new(token);
                if symbols.contains(&symbol) {
                    compressed.symbols.push(symbol);
                } else {
                    compressed.leftovers.push(symbol.as_str().to_string());
                }
            }
            compressed
        })
        .collect::<Vec<_>>();

    debug!(
        transactions = transactions.len(),
        symbols = symbols.len(),
        "read compressed dataset"
    );
    Ok(CompressedDataset {
        transactions,
        symbols,
    })
}

/// Parses `Transaction <n>: tok tok ...`.
fn parse_transaction(line: &str, line_no: usize) -> Result<Vec<String>> {
    let mut parts = line.split_whitespace();

    if parts.next() != Some(TRANSACTION_LABEL) {
        return Err(malformed(line_no, format!("expected '{TRANSACTION_LABEL} <n>:'")));
    }

    let numbered = parts
        .next()
        .and_then(|n| n.strip_suffix(':'))
        .is_some_and(|n| n.parse::<usize>().is_ok());
    if !numbered {
        return Err(malformed(line_no, "missing transaction number"));
    }

    Ok(parts.map(str::to_string).collect())
}

/// Parses `<symbol>: item, item, ...`.
fn parse_mapping(line: &str, line_no: usize) -> Result<(Symbol, Itemset<String>)> {
    let Some((symbol, items)) = line.trim().split_once(": ") else {
        return Err(malformed(line_no, "expected '<symbol>: <items>'"));
    };

    if symbol.is_empty() || symbol.contains(char::is_whitespace) {
        return Err(malformed(line_no, format!("invalid symbol '{symbol}'")));
    }

    let items: Vec<String> = items.split(", ").map(|i| i.trim().to_string()).collect();
    if items.iter().any(String::is_empty) {
        return Err(malformed(line_no, "empty item in mapping"));
    }

    Ok((Symbol::new(symbol), Itemset::new(items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compressor::ItemsetCompressor;
    use std::io::Cursor;

    fn basket() -> Vec<Vec<&'static str>> {
        vec![
            vec!["a", "b", "c"],
            vec!["a", "b"],
            vec!["a", "b", "d"],
            vec!["a", "c"],
        ]
    }

    fn render<T: Display + Hash + Ord + Clone>(dataset: &CompressedDataset<T>) -> String {
        let mut out = Vec::new();
        write_compressed(&mut out, dataset).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_layout() {
        let compressed = ItemsetCompressor::default().compress(&basket()).unwrap();
        let expected = "\
Compressed Dataset:
Transaction 1: A C E
Transaction 2: C E
Transaction 3: C E d
Transaction 4: A E

Mapping:
A: c
B: a, c
C: b
D: a, b
E: a
";
        assert_eq!(render(&compressed), expected);
    }

    #[test]
    fn test_read_back() {
        let compressed = ItemsetCompressor::default().compress(&basket()).unwrap();
        let text = render(&compressed);
        let restored = read_compressed(Cursor::new(text)).unwrap();

        assert_eq!(restored.transactions.len(), 4);
        assert_eq!(restored.symbols.len(), 5);
        assert_eq!(restored.transactions[2].leftovers, vec!["d".to_string()]);
        assert_eq!(
            restored.transactions[0].symbols,
            vec![Symbol::new("A"), Symbol::new("C"), Symbol::new("E")]
        );

        for (decoded, original) in restored.iter_decoded().zip(basket()) {
            let mut decoded = decoded.unwrap();
            decoded.sort();
            let mut original: Vec<String> = original.iter().map(|s| s.to_string()).collect();
            original.sort();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_empty_transaction_survives() {
        let data = vec![vec!["x", "y"], vec![], vec!["x", "y"]];
        let compressed = ItemsetCompressor::default().compress(&data).unwrap();
        let text = render(&compressed);
        assert!(text.contains("Transaction 2: \n"));

        let restored = read_compressed(Cursor::new(text)).unwrap();
        assert_eq!(restored.transactions.len(), 3);
        assert!(restored.transactions[1].is_empty());
    }

    #[test]
    fn test_prune_then_write() {
        let mut compressed = ItemsetCompressor::default().compress(&basket()).unwrap();
        compressed.prune();
        let text = render(&compressed);
        assert!(text.ends_with("Mapping:\nA: c\nC: b\nE: a\n"));
    }

    #[test]
    fn test_unrepresentable_items() {
        let data = vec![vec!["two words"], vec!["x"]];
        let compressed = ItemsetCompressor::default().compress(&data).unwrap();
        let err = write_compressed(Vec::<u8>::new(), &compressed).unwrap_err();
        assert!(matches!(err, CompressError::UnrepresentableItem { .. }));

        // an item spelled like a symbol would be misread
        let data = vec![vec!["A", "q"], vec!["A", "q"]];
        let compressed = ItemsetCompressor::default().compress(&data).unwrap();
        let err = write_compressed(Vec::<u8>::new(), &compressed).unwrap_err();
        assert!(matches!(err, CompressError::UnrepresentableItem { item } if item == "A"));
    }

    #[test]
    fn test_unrepresentable_symbols() {
        for code in ["A B", "A,B", "A:", ""] {
            let symbols =
                SymbolTable::from_entries(vec![(Symbol::new(code), Itemset::new(["x"]))]);
            let dataset = CompressedDataset {
                transactions: vec![CompressedTransaction {
                    symbols: vec![Symbol::new(code)],
                    leftovers: Vec::new(),
                }],
                symbols,
            };
            let mut out = Vec::new();
            let err = write_compressed(&mut out, &dataset).unwrap_err();
            assert!(
                matches!(err, CompressError::UnrepresentableSymbol { symbol } if symbol == code)
            );
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_missing_header() {
        let err = read_compressed(Cursor::new("Transaction 1: a\n")).unwrap_err();
        assert!(matches!(err, CompressError::MalformedMapping { line: 1, .. }));
    }

    #[test]
    fn test_missing_mapping_section() {
        let text = "Compressed Dataset:\nTransaction 1: a b\n";
        let err = read_compressed(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, CompressError::MalformedMapping { line: 3, .. }));
    }

    #[test]
    fn test_bad_lines() {
        let text = "Compressed Dataset:\nTxn 1: a\n\nMapping:\n";
        let err = read_compressed(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, CompressError::MalformedMapping { line: 2, .. }));

        let text = "Compressed Dataset:\nTransaction one: a\n\nMapping:\n";
        assert!(read_compressed(Cursor::new(text)).is_err());

        let text = "Compressed Dataset:\nTransaction 1: A\n\nMapping:\nA c\n";
        let err = read_compressed(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, CompressError::MalformedMapping { line: 5, .. }));

        let text = "Compressed Dataset:\n\nMapping:\nA: c\nA: d\n";
        let err = read_compressed(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, CompressError::MalformedMapping { line: 5, .. }));
    }

    #[test]
    fn test_unreferenced_tokens_are_items() {
        let text = "Compressed Dataset:\nTransaction 1: B x\n\nMapping:\nA: c\n";
        let restored = read_compressed(Cursor::new(text)).unwrap();
        assert!(restored.transactions[0].symbols.is_empty());
        assert_eq!(
            restored.transactions[0].leftovers,
            vec!["B".to_string(), "x".to_string()]
        );
    }
}
