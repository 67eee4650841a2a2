use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvClustError {
    #[error(
        "Signatures of pass '{pass}' were scanned from alignments that are neither queryname- nor coordinate-sorted (declared sort order: {found})"
    )]
    InputOrder { pass: String, found: String },

    #[error("Two evidence passes are named '{0}'. Pass names must be unique")]
    DuplicatePass(String),

    #[error("Invalid run configuration: {0}")]
    InvalidConfig(String),

    #[error("Can't parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Error parsing reference metadata: {0}")]
    ReferenceParse(String),

    #[error("Error parsing depth file: {0}")]
    DepthParse(String),

    #[error("Corrupted file. 0 contigs found in the file: {0}")]
    EmptyReference(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SvClustError>;

/// Reasons a single signature record is rejected.
///
/// These never abort a run. The store turns them into
/// [`Diagnostic::MalformedSignature`](crate::diagnostics::Diagnostic) entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedSignature {
    #[error("missing column '{0}'")]
    MissingField(&'static str),

    #[error("can't parse {field} from '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown variant type '{0}'")]
    UnknownType(String),

    #[error("invalid attribute '{0}'")]
    InvalidAttribute(String),

    #[error("invalid interval: start {start} > end {end}")]
    InvertedInterval { start: u32, end: u32 },

    #[error("empty interval at {0} for an interval-type signature")]
    EmptyInterval(u32),

    #[error("{0} signature must be a point (start == end)")]
    NotAPoint(&'static str),

    #[error("insertion without a length")]
    ZeroLength,

    #[error("tandem duplication with zero copies")]
    ZeroCopies,

    #[error("tandem duplication of {span} bp with {copies} copies is too large")]
    SizeOverflow { span: u32, copies: u32 },

    #[error("translocation without a second breakend")]
    MissingMate,

    #[error("insertion with detected origin but no origin locus")]
    MissingOrigin,
}
