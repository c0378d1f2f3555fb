//! Parameter and return-value validation.
//!
//! Validation is an external collaborator of the dispatch pipeline: the
//! dispatcher calls [`Validator::validate_parameters`] before invoking a
//! handler and [`Validator::validate_return`] on its response. A failure in
//! either aborts the request; the handler is never invoked after a
//! parameter failure.

use thiserror::Error;

use crate::params::Params;
use crate::route::Route;

/// Identifies the handler being validated, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// The route the handler is bound to.
    pub route: Route,
    /// The parameter names the handler expects, in sorted key order.
    pub expected_params: Vec<String>,
}

impl MethodSignature {
    /// Creates a signature for a route with the given expected parameters.
    ///
    /// The names are sorted on construction so they line up with the
    /// positional convention in [`Params::ordered_values`].
    pub fn new(route: Route, expected_params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut expected_params: Vec<String> =
            expected_params.into_iter().map(Into::into).collect();
        expected_params.sort();
        Self {
            route,
            expected_params,
        }
    }
}

/// Validation failure for a single request.
///
/// Fatal for that request; the process keeps serving others.
#[derive(Debug, Error)]
#[error("validation failed for {route}: {message}")]
pub struct ValidationError {
    /// The route whose handler failed validation.
    pub route: Route,
    /// What was wrong with the parameters or return value.
    pub message: String,
}

/// External validator collaborator.
///
/// Invoked both before the handler call (parameters) and after it (return
/// value).
pub trait Validator: Send + Sync {
    /// Validates the request parameters against the handler's signature.
    fn validate_parameters(
        &self,
        signature: &MethodSignature,
        params: &Params,
    ) -> Result<(), ValidationError>;

    /// Validates the handler's return value.
    fn validate_return(
        &self,
        signature: &MethodSignature,
        response: &str,
    ) -> Result<(), ValidationError>;
}

/// A validator that accepts everything.
pub struct NoopValidator;

impl Validator for NoopValidator {
    fn validate_parameters(&self, _: &MethodSignature, _: &Params) -> Result<(), ValidationError> {
        Ok(())
    }

    fn validate_return(&self, _: &MethodSignature, _: &str) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Validates that the parameter keys match the signature exactly.
///
/// Every expected parameter must be present and no unexpected key may
/// appear; with the positional convention, a stray key would silently
/// shift every argument after it. Return values must be non-empty.
pub struct ArgSpecValidator;

impl Validator for ArgSpecValidator {
    fn validate_parameters(
        &self,
        signature: &MethodSignature,
        params: &Params,
    ) -> Result<(), ValidationError> {
        for expected in &signature.expected_params {
            if !params.contains(expected) {
                return Err(ValidationError {
                    route: signature.route.clone(),
                    message: format!("missing parameter `{}`", expected),
                });
            }
        }
        for key in params.keys() {
            if !signature.expected_params.iter().any(|p| p == key) {
                return Err(ValidationError {
                    route: signature.route.clone(),
                    message: format!("unexpected parameter `{}`", key),
                });
            }
        }
        Ok(())
    }

    fn validate_return(
        &self,
        signature: &MethodSignature,
        response: &str,
    ) -> Result<(), ValidationError> {
        if response.is_empty() {
            return Err(ValidationError {
                route: signature.route.clone(),
                message: "handler returned an empty response".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(params: &[&str]) -> MethodSignature {
        MethodSignature::new(Route::new("home", "index"), params.iter().copied())
    }

    #[test]
    fn test_signature_sorts_params() {
        let signature = sig(&["zeta", "alpha"]);
        assert_eq!(signature.expected_params, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_argspec_accepts_exact_match() {
        let params: Params = [("alpha", "1"), ("zeta", "2")].into_iter().collect();
        assert!(ArgSpecValidator
            .validate_parameters(&sig(&["alpha", "zeta"]), &params)
            .is_ok());
    }

    #[test]
    fn test_argspec_rejects_missing() {
        let params: Params = [("alpha", "1")].into_iter().collect();
        let err = ArgSpecValidator
            .validate_parameters(&sig(&["alpha", "zeta"]), &params)
            .unwrap_err();
        assert!(err.to_string().contains("missing parameter `zeta`"));
    }

    #[test]
    fn test_argspec_rejects_unexpected() {
        let params: Params = [("alpha", "1"), ("rogue", "x")].into_iter().collect();
        let err = ArgSpecValidator
            .validate_parameters(&sig(&["alpha"]), &params)
            .unwrap_err();
        assert!(err.to_string().contains("unexpected parameter `rogue`"));
    }

    #[test]
    fn test_argspec_rejects_empty_return() {
        let err = ArgSpecValidator
            .validate_return(&sig(&[]), "")
            .unwrap_err();
        assert!(err.to_string().contains("empty response"));
    }

    #[test]
    fn test_noop_accepts_anything() {
        let params: Params = [("whatever", "1")].into_iter().collect();
        assert!(NoopValidator.validate_parameters(&sig(&[]), &params).is_ok());
        assert!(NoopValidator.validate_return(&sig(&[]), "").is_ok());
    }
}
