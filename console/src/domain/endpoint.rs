//! Registry of API endpoints.
//!
//! Resource clients and cache keys name their endpoint only through
//! [`Endpoint`], so a read's key and a mutation's invalidation prefix always
//! agree.

use serde::Serialize;

/// Logical API resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Token issuance.
    Token,
    /// Session login.
    Login,
    /// Liveness probe.
    Health,
    /// Asset records.
    Assets,
    /// Asset categories.
    Categories,
    /// Departments.
    Departments,
    /// The signed-in user's editable profile.
    Profile,
    /// The signed-in user's identity.
    Me,
    /// User accounts.
    Users,
    /// Manufacturers.
    Manufacturers,
    /// Suppliers.
    Suppliers,
    /// Asset models.
    Models,
}

impl Endpoint {
    /// Every registered endpoint.
    pub const ALL: [Self; 12] = [
        Self::Token,
        Self::Login,
        Self::Health,
        Self::Assets,
        Self::Categories,
        Self::Departments,
        Self::Profile,
        Self::Me,
        Self::Users,
        Self::Manufacturers,
        Self::Suppliers,
        Self::Models,
    ];

    /// URL path segment, relative to the API base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Token => "authentication/token",
            Self::Login => "login",
            Self::Health => "health",
            Self::Assets => "assets",
            Self::Categories => "categories",
            Self::Departments => "departments",
            Self::Profile => "profile",
            Self::Me => "me",
            Self::Users => "users",
            Self::Manufacturers => "manufacturers",
            Self::Suppliers => "suppliers",
            Self::Models => "models",
        }
    }

    /// Path of one record under this endpoint.
    pub fn record_path(self, id: impl std::fmt::Display) -> String {
        format!("{}/{id}", self.path())
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn paths_are_unique() {
        let paths: HashSet<_> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(paths.len(), Endpoint::ALL.len());
    }

    #[rstest]
    #[case(Endpoint::Assets, "assets/7")]
    #[case(Endpoint::Models, "models/7")]
    fn record_paths_append_the_id(#[case] endpoint: Endpoint, #[case] expected: &str) {
        assert_eq!(endpoint.record_path(7), expected);
    }

    #[rstest]
    fn token_lives_under_authentication() {
        assert_eq!(Endpoint::Token.to_string(), "authentication/token");
    }
}
