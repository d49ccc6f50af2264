use thiserror::Error;

/// Failure modes of the void request pipeline. Every variant is fatal to the current void attempt: the error is
/// logged at the point it is detected and then propagated to the caller. Retry policy, if any, lives with the caller.
#[derive(Debug, Clone, Error)]
pub enum VoidError {
    #[error("Void error - there is no order to void against")]
    MissingOrder,
    #[error("Void error - wrong order transaction history. {0}")]
    MissingLedger(String),
    #[error("Void error - no voidable transaction was found for this order")]
    NoVoidableTransaction,
    #[error("Void error - the order total is not a valid amount. {0}")]
    InvalidAmount(String),
}

#[derive(Debug, Error)]
pub enum GatewayApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid request: {0}")]
    RequestError(String),
    #[error("Invalid response: {0}")]
    ResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Void request could not be built. {0}")]
    Void(#[from] VoidError),
}
