//! Authorization policy shared by every resource controller.
//!
//! [`authorize`] is a pure function of the caller, the operation and what is
//! known about the target so far. Controllers call it before a lookup (with
//! [`InstanceState::Pending`]) and again once the instance is resolved, which
//! keeps the check order identical across resources:
//!
//! 1. parent scope must exist;
//! 2. groups refuse every write;
//! 3. the caller must be authenticated;
//! 4. the instance must exist;
//! 5. updates and deletes require authorship.

use std::fmt;

use tracing::debug;

use crate::domain::{Error, Identity, UserId};

/// Resource types exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Group,
    Post,
    Comment,
}

impl ResourceKind {
    /// Lowercase name used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation requested on a resource. `Update` covers PUT and PATCH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Whether the operation mutates state.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Delete)
    }

    /// Whether the operation is gated on authorship.
    #[must_use]
    pub const fn requires_ownership(self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }
}

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caller {
    /// No token, or a token that resolved to nobody.
    #[default]
    Anonymous,
    /// A resolved identity.
    Authenticated(Identity),
}

impl Caller {
    /// The resolved identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }
}

impl From<Option<Identity>> for Caller {
    fn from(value: Option<Identity>) -> Self {
        value.map_or(Self::Anonymous, Self::Authenticated)
    }
}

/// State of the parent scope a resource lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// The resource is not nested.
    Unscoped,
    /// The parent resolved.
    Found,
    /// The parent named in the path does not exist.
    Missing,
}

/// What is known about the addressed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    /// The operation addresses the collection (list, create).
    Collection,
    /// An instance is addressed but has not been looked up yet.
    Pending,
    /// The addressed instance does not exist.
    Missing,
    /// The instance exists and was written by this user. Groups carry no
    /// author and use [`InstanceState::Unowned`].
    Owned(UserId),
    /// The instance exists and has no author.
    Unowned,
}

/// Resource kind plus everything resolved about it so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub kind: ResourceKind,
    pub scope: ScopeState,
    pub instance: InstanceState,
}

impl Target {
    /// The collection of `kind`.
    #[must_use]
    pub const fn collection(kind: ResourceKind) -> Self {
        Self {
            kind,
            scope: ScopeState::Unscoped,
            instance: InstanceState::Collection,
        }
    }

    /// An instance of `kind` that has not been looked up yet.
    #[must_use]
    pub const fn instance(kind: ResourceKind) -> Self {
        Self {
            kind,
            scope: ScopeState::Unscoped,
            instance: InstanceState::Pending,
        }
    }

    /// Record the parent scope state.
    #[must_use]
    pub const fn within(mut self, scope: ScopeState) -> Self {
        self.scope = scope;
        self
    }

    /// Record the outcome of the instance lookup.
    #[must_use]
    pub const fn resolved(mut self, instance: InstanceState) -> Self {
        self.instance = instance;
        self
    }
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Unauthenticated,
    Forbidden,
    NotFound,
    MethodNotAllowed,
}

/// Decide whether `caller` may perform `operation` on `target`.
///
/// # Examples
/// ```
/// use yatube_api::domain::policy::{authorize, Caller, Decision, Operation, ResourceKind, Target};
///
/// let decision = authorize(
///     &Caller::Anonymous,
///     Operation::Create,
///     &Target::collection(ResourceKind::Group),
/// );
/// assert_eq!(decision, Decision::MethodNotAllowed);
/// ```
#[must_use]
pub fn authorize(caller: &Caller, operation: Operation, target: &Target) -> Decision {
    if target.scope == ScopeState::Missing {
        return Decision::NotFound;
    }
    if target.kind == ResourceKind::Group && operation.is_write() {
        return Decision::MethodNotAllowed;
    }
    let Some(identity) = caller.identity() else {
        return Decision::Unauthenticated;
    };
    match target.instance {
        InstanceState::Missing => Decision::NotFound,
        InstanceState::Owned(author)
            if operation.requires_ownership() && author != identity.id() =>
        {
            Decision::Forbidden
        }
        InstanceState::Collection
        | InstanceState::Pending
        | InstanceState::Owned(_)
        | InstanceState::Unowned => Decision::Allowed,
    }
}

impl Decision {
    /// Convert the decision into the error reported to the caller.
    pub fn into_result(self, target: &Target) -> Result<(), Error> {
        match self {
            Self::Allowed => Ok(()),
            Self::Unauthenticated => Err(Error::unauthorized(
                "Authentication credentials were not provided.",
            )),
            Self::Forbidden => Err(Error::forbidden(
                "You do not have permission to perform this action.",
            )),
            Self::NotFound => {
                let missing = if target.scope == ScopeState::Missing {
                    ResourceKind::Post
                } else {
                    target.kind
                };
                Err(Error::not_found(format!("{missing} not found")))
            }
            Self::MethodNotAllowed => Err(Error::method_not_allowed(format!(
                "{}s are read-only",
                target.kind
            ))),
        }
    }
}

/// Evaluate the policy and turn a denial into an [`Error`].
pub fn enforce(caller: &Caller, operation: Operation, target: &Target) -> Result<(), Error> {
    let decision = authorize(caller, operation, target);
    if decision != Decision::Allowed {
        debug!(
            resource = %target.kind,
            ?operation,
            ?decision,
            caller = ?caller.identity().map(Identity::id),
            "request denied by policy"
        );
    }
    decision.into_result(target)
}
