/// Ownership-based authorization guard
///
/// Every employee operation passes through [`authorize`] before touching the
/// repository. The guard returns a tagged [`Decision`] instead of scattering
/// per-handler conditionals:
///
/// 1. No resolvable claim → `Deny(Unauthorized)`, before any resource lookup
/// 2. `List`/`Create` → allowed for any authenticated claim
/// 3. `Update`/`Delete` → allowed only for the record's owner
///
/// Ownership is exclusive: a record has exactly one owner (the creating
/// user) and there is no sharing or delegation.
///
/// # Example
///
/// ```
/// use staffdesk_shared::auth::authorization::{authorize, Action, Decision, DenyReason};
/// use staffdesk_shared::auth::middleware::AuthContext;
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let auth = AuthContext::new(user_id, "a@x.com".to_string());
///
/// // Anyone authenticated may list
/// assert_eq!(authorize(Some(&auth), Action::List, None), Decision::Allow);
///
/// // Only the owner may delete
/// let other = Uuid::new_v4();
/// assert_eq!(
///     authorize(Some(&auth), Action::Delete, Some(other)),
///     Decision::Deny(DenyReason::Forbidden)
/// );
/// ```

use uuid::Uuid;

use super::middleware::AuthContext;

/// Operations the guard mediates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read the caller-owned listing
    List,

    /// Create a record (owner stamped from the claim)
    Create,

    /// Mutate an existing record
    Update,

    /// Remove an existing record
    Delete,
}

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DenyReason {
    /// No valid session claim
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated but not the resource owner
    #[error("Not authorized to access this resource")]
    Forbidden,
}

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Operation may proceed
    Allow,

    /// Operation is refused
    Deny(DenyReason),
}

impl Decision {
    /// Converts the decision into a `Result`, for use with `?`
    pub fn into_result(self) -> Result<(), DenyReason> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(reason),
        }
    }
}

/// Decides whether `claim` may perform `action`
///
/// `resource_owner` is the owning user of the target record, when one
/// exists. `Update`/`Delete` require it to match the claim; `List`/`Create`
/// ignore it. Stateless and side-effect free; owner stamping on create is
/// the repository's job.
pub fn authorize(
    claim: Option<&AuthContext>,
    action: Action,
    resource_owner: Option<Uuid>,
) -> Decision {
    // Unauthenticated callers are rejected before any resource is consulted
    let Some(claim) = claim else {
        return Decision::Deny(DenyReason::Unauthorized);
    };

    match action {
        Action::List | Action::Create => Decision::Allow,
        Action::Update | Action::Delete => match resource_owner {
            Some(owner) if owner == claim.user_id => Decision::Allow,
            _ => Decision::Deny(DenyReason::Forbidden),
        },
    }
}
