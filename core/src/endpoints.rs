//! Fixed table of resource base paths.

/// Logical resources exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Notes,
    Categories,
}

impl Endpoint {
    /// Collection path, relative to the API base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Notes => "/notes",
            Endpoint::Categories => "/categories",
        }
    }
}
