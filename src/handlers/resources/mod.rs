//! CRUD proxies for the content resources backed by Supabase tables.

pub mod records;

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Content resource exposed under `/api/{resource}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Writeups,
    Blogs,
    Tools,
    Videos,
}

impl Resource {
    /// Supabase table backing this resource.
    pub fn table(&self) -> &'static str {
        match self {
            Resource::Writeups => "writeups",
            Resource::Blogs => "blogs",
            Resource::Tools => "tools",
            Resource::Videos => "videos",
        }
    }

    /// Singular display name used in response messages.
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Writeups => "Writeup",
            Resource::Blogs => "Blog",
            Resource::Tools => "Tool",
            Resource::Videos => "Video",
        }
    }
}

impl FromStr for Resource {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "writeups" => Ok(Resource::Writeups),
            "blogs" => Ok(Resource::Blogs),
            "tools" => Ok(Resource::Tools),
            "videos" => Ok(Resource::Videos),
            other => Err(ApiError::not_found(format!(
                "API endpoint not found: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}
