use thiserror::Error;

/// Errors raised while validating rescue model parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// Environmental stress outside `[0, 1)`.
    #[error("Stress r must be in [0, 1), got {0}")]
    InvalidStress(f64),

    /// Negative or non-finite selective advantage.
    #[error("Selective advantage s must be a non-negative finite number, got {0}")]
    InvalidSelection(f64),

    /// Mutation probability outside `[0, 1]`.
    #[error("Mutation probability u must be in [0, 1], got {0}")]
    InvalidMutationRate(f64),

    /// A run needs at least the initial generation.
    #[error("max_generations must be at least 1")]
    InvalidGenerations,
}

/// Errors raised by the replicate runner.
#[derive(Debug, Error)]
pub enum MultiSimError {
    #[error("Number of epochs must be greater than zero")]
    NoEpochs,

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Parameters(#[from] ParameterError),
}
