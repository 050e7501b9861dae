// Authorization guards. Ownership in this system is by email comparison, not
// structural foreign keys, so the checks live here as pure predicates.

use crate::error::ApiError;

/// Self-match guard: when the caller supplies an identity parameter (query
/// string or body field), it must equal the authenticated identity. Absent
/// parameters pass through unchanged.
pub fn ensure_self(claimed: Option<&str>, authenticated: &str) -> Result<(), ApiError> {
    match claimed {
        Some(claimed) if claimed != authenticated => Err(ApiError::forbidden(
            "Caller identity does not match the authenticated user",
        )),
        _ => Ok(()),
    }
}

/// Owner guard: the requester must be the record's owner
pub fn ensure_owner(owner: &str, requester: &str) -> Result<(), ApiError> {
    if owner != requester {
        return Err(ApiError::forbidden("Unauthorized access attempt"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_match_passes_on_equal_or_absent() {
        assert!(ensure_self(Some("a@x.com"), "a@x.com").is_ok());
        assert!(ensure_self(None, "a@x.com").is_ok());
    }

    #[test]
    fn test_self_match_rejects_mismatch() {
        let err = ensure_self(Some("b@x.com"), "a@x.com").unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_owner_guard() {
        assert!(ensure_owner("a@x.com", "a@x.com").is_ok());
        let err = ensure_owner("a@x.com", "b@x.com").unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
