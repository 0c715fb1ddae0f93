#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A path identifier could not be parsed.
    #[error("invalid {entity} id")]
    InvalidId { entity: &'static str },

    /// A request body could not be decoded into the entity's input shape.
    #[error("invalid {entity} data")]
    InvalidData { entity: &'static str },

    /// No live user matches the supplied email and password.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    /// The detail is for logs only; the rendered message is fixed.
    #[error("server error")]
    Internal(String),
}
