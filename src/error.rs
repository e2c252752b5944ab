use thiserror::Error;

/// Errors raised by mining, encoding and the text format.
#[derive(Error, Debug)]
pub enum CompressError {
    /// Minimum support must be at least 1.
    #[error("invalid minimum support {value}: must be at least 1")]
    InvalidSupportThreshold { value: usize },

    /// The symbol alphabet cannot be used to name itemsets.
    #[error("invalid symbol alphabet: {detail}")]
    InvalidAlphabet { detail: String },

    /// More frequent itemsets than the alphabet can name.
    #[error("symbol alphabet exhausted: {required} itemsets, room for {capacity}")]
    AlphabetExhausted { required: usize, capacity: usize },

    /// A compressed transaction references a symbol the table does not define.
    #[error("unknown symbol '{symbol}'")]
    UnknownSymbol { symbol: String },

    /// Persisted dataset text does not follow the section layout.
    #[error("malformed compressed dataset at line {line}: {detail}")]
    MalformedMapping { line: usize, detail: String },

    /// An item whose text form would break the persisted layout.
    #[error("item '{item}' cannot be written: empty or contains whitespace or ','")]
    UnrepresentableItem { item: String },

    /// A symbol whose code would break the persisted layout.
    #[error("symbol '{symbol}' cannot be written: empty or contains whitespace, ',' or ':'")]
    UnrepresentableSymbol { symbol: String },

    /// Underlying reader or writer failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = CompressError> = std::result::Result<T, E>;
