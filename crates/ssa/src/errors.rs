use thiserror::Error;

/// Errors raised while validating a reaction network definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// The network declares no regimes.
    #[error("Reaction network has no regimes")]
    NoRegimes,

    /// A regime declares no reactions.
    #[error("Regime '{0}' has no reactions")]
    EmptyRegime(String),

    /// Two regimes share the same name.
    #[error("Duplicate regime name: '{0}'")]
    DuplicateRegime(String),

    /// A regime name was requested that the network does not define.
    #[error("Unknown regime: '{0}'")]
    UnknownRegime(String),

    /// A state-change vector does not match the number of species.
    #[error(
        "State-change vector of reaction {reaction} in regime '{regime}' has length {len}, expected {expected}"
    )]
    StateChangeLength {
        regime: String,
        reaction: usize,
        len: usize,
        expected: usize,
    },

    /// The number of rules differs from the number of state-change vectors.
    #[error("Regime '{regime}' has {rules} rules but {changes} state-change vectors")]
    RuleCountMismatch {
        regime: String,
        rules: usize,
        changes: usize,
    },

    /// A rule references a species index outside the network.
    #[error("Rule of reaction {reaction} in regime '{regime}' references species {species} (species count = {n_species})")]
    SpeciesOutOfRange {
        regime: String,
        reaction: usize,
        species: usize,
        n_species: usize,
    },

    /// A rate constant is negative or not finite.
    #[error("Invalid rate constant {rate} for reaction {reaction} in regime '{regime}'")]
    InvalidRate {
        regime: String,
        reaction: usize,
        rate: f64,
    },

    /// The network declares zero species.
    #[error("Reaction network has no species")]
    NoSpecies,
}

/// Errors raised while validating run settings against a network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The stop condition was named but its limit was not provided.
    #[error("{limit} must be specified when stop_condition is '{condition}'")]
    MissingStopLimit {
        condition: &'static str,
        limit: &'static str,
    },

    /// The stop condition name is not recognized.
    #[error("Invalid stop_condition '{0}'. Choose 'time' or 'iterations'")]
    UnknownStopCondition(String),

    /// A stop limit is not usable (negative, NaN, ...).
    #[error("Invalid stop limit: {0}")]
    InvalidStopLimit(String),

    /// The initial counts do not cover every species.
    #[error("Initial counts have length {len}, network has {expected} species")]
    InitialCountsLength { len: usize, expected: usize },

    /// A pinned reagent index is outside the count vector.
    #[error("Fixed reagent index {index} out of bounds (species count = {n_species})")]
    FixedReagentOutOfRange { index: usize, n_species: usize },

    /// Rescale threshold or target size is unusable.
    #[error("Invalid rescale parameters: {0}")]
    InvalidRescale(String),

    /// Oscillation is enabled but a regime has no interval.
    #[error("No oscillation interval configured for regime '{0}'")]
    MissingInterval(String),

    /// An oscillation interval is not a positive finite number.
    #[error("Invalid oscillation interval {interval} for regime '{regime}'")]
    InvalidInterval { regime: String, interval: f64 },

    /// A transition table is incomplete or names unknown regimes.
    #[error("Invalid regime transition table: {0}")]
    InvalidTransition(String),

    /// Wraps a regime lookup failure (e.g. unknown starting regime).
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Errors that can occur during simulation building.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A required parameter is missing
    #[error("Missing required parameter: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid network: {0}")]
    Network(#[from] NetworkError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised when loading a configuration document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the replicate runner.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Number of replicates must be greater than zero")]
    NoReplicates,

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Build(#[from] BuilderError),
}

/// Errors raised when a stored history is inconsistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    #[error("History has no initial state")]
    Empty,

    #[error("History has {snapshots} snapshots but {times} times")]
    LengthMismatch { snapshots: usize, times: usize },

    #[error("Snapshot {index} has {len} species, expected {expected}")]
    RaggedSnapshot {
        index: usize,
        len: usize,
        expected: usize,
    },

    #[error("History time at entry {0} is earlier than the one before it")]
    UnorderedTimes(usize),
}
