//! Trust predicates over identities.

use std::collections::HashSet;

use crate::identity::record::IdentityRecord;

/// Emails granted administrator rights, as configured by the operator.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdminAllowlist(HashSet<String>);

impl AdminAllowlist {
    /// Whether `email` is listed. Comparison is exact.
    pub fn contains(&self, email: &str) -> bool {
        self.0.contains(email)
    }

    /// Number of listed emails.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody is an administrator.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AdminAllowlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Pure admin / wiki-editor predicates built around an injected allowlist.
#[derive(Debug, Default, Clone)]
pub struct TrustPolicy {
    admins: AdminAllowlist,
}

impl TrustPolicy {
    /// Create a new [`TrustPolicy`].
    pub fn new(admins: AdminAllowlist) -> Self {
        Self { admins }
    }

    /// True iff the identity's email is on the allowlist.
    pub fn is_admin(&self, identity: &IdentityRecord) -> bool {
        !identity.email.is_empty() && self.admins.contains(&identity.email)
    }

    /// Admins and verified identities may edit the wiki.
    pub fn is_wiki_editor(&self, identity: &IdentityRecord) -> bool {
        self.is_admin(identity) || identity.verified
    }
}
