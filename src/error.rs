use thiserror::Error;

/// Failures from the REST API boundary
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("could not decode server response: {0}")]
    Decode(String),

    /// HTTP call succeeded but the body carried no recognizable record
    #[error("{message}")]
    UnexpectedShape { message: String },
}

/// Failures surfaced by the checkout flow.
///
/// Missing-input variants are recovered locally (message shown, no network
/// call); the rest leave the user on the same screen to retry manually.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("no property data was provided; return to the listing form")]
    MissingDraft,

    #[error("select a promotion plan before continuing")]
    NoPlanSelected,

    #[error("address is incomplete: missing {field}")]
    IncompleteAddress { field: &'static str },

    #[error("a save is already in progress")]
    SaveInFlight,

    #[error("submission was cancelled before the server responded")]
    Stale,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{message}")]
    UnexpectedResponse { message: String },
}

impl CheckoutError {
    /// Missing-input errors never reach the server and are not worth
    /// logging as failures.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            CheckoutError::MissingDraft
                | CheckoutError::NoPlanSelected
                | CheckoutError::IncompleteAddress { .. }
                | CheckoutError::SaveInFlight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_errors_are_classified() {
        assert!(CheckoutError::MissingDraft.is_local());
        assert!(CheckoutError::IncompleteAddress { field: "sub_city" }.is_local());
        assert!(!CheckoutError::UnexpectedResponse {
            message: "no id".to_string()
        }
        .is_local());
    }

    #[test]
    fn display_messages_are_user_facing() {
        let err = CheckoutError::IncompleteAddress {
            field: "regional_state",
        };
        assert_eq!(
            err.to_string(),
            "address is incomplete: missing regional_state"
        );
    }
}
