use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enumerated column holds a value the application does not know.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Unknown {kind} value stored in database: '{value}'")]
    UnknownEnumValue {
        /// Name of the enumerated field, e.g. `trip status`
        kind: &'static str,
        /// The stored value that failed to parse
        value: String,
    },

    /// A stored JSON column does not have the expected shape.
    #[error("Malformed {field} JSON stored in database: {source}")]
    MalformedJson {
        /// Name of the JSON column
        field: &'static str,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },
}
