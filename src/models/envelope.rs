use serde::{Deserialize, Serialize};

use crate::{ListingsError, ListingsResult};

/// Request envelope posted to the GraphQL endpoint.
///
/// The operation document goes under `query` whether it is a query or a
/// mutation.
#[derive(Debug, Clone, Serialize)]
pub struct Body<'a, TVariables> {
    /// The GraphQL document text, sent verbatim.
    pub query: &'a str,

    /// Variables referenced by the document, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<TVariables>,
}

impl<'a> Body<'a, ()> {
    /// Creates an envelope without variables.
    pub fn new(query: &'a str) -> Self {
        Self { query, variables: None }
    }
}

impl<'a, TVariables> Body<'a, TVariables> {
    /// Creates an envelope carrying the given variables.
    pub fn with_variables(query: &'a str, variables: Option<TVariables>) -> Self {
        Self { query, variables }
    }
}

/// Response envelope returned by the GraphQL endpoint.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<TData> {
    /// The resolved data, `null` when a non-nullable root field failed.
    pub data: Option<TData>,

    /// Errors raised while executing the operation.
    pub errors: Option<Vec<GraphQlError>>,
}

/// A single entry of a response's `errors` list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphQlError {
    /// Human readable description of the failure.
    pub message: String,
}

impl<TData> GraphQlResponse<TData> {
    /// Returns the first error message, if the error list is non-empty.
    pub fn first_error(&self) -> Option<&str> {
        self.errors
            .as_deref()
            .and_then(|errors| errors.first())
            .map(|error| error.message.as_str())
    }

    /// Collapses the envelope into its payload.
    ///
    /// A non-empty error list wins over any data present; only the first
    /// message is reported.
    pub fn into_result(self) -> ListingsResult<TData> {
        if let Some(message) = self.first_error() {
            return Err(ListingsError::GraphQl(message.to_string()));
        }
        self.data.ok_or(ListingsError::MissingData)
    }
}
