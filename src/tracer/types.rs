//! Call-site snapshots and conflict reports.

use std::fmt;
use std::panic::Location;

/// Where a registration call originated.
///
/// `function` holds whatever the capturing side can name: the module path
/// when captured by [`action_info!`](crate::action_info), empty when
/// captured through `#[track_caller]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionInfo {
    pub file: Option<String>,
    pub line: u32,
    pub function: String,
    /// Source text of the call.
    pub source: String,
}

impl ActionInfo {
    /// Creates a site from its parts.
    pub fn new(
        file: Option<&str>,
        line: u32,
        function: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            file: file.map(str::to_string),
            line,
            function: function.into(),
            source: source.into(),
        }
    }

    /// A site that could not be resolved.
    pub fn unknown() -> Self {
        Self::new(None, 0, "", "")
    }

    /// The location of the caller, through any chain of `#[track_caller]`
    /// functions.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(Some(location.file()), location.line(), "", "")
    }
}

impl From<(Option<String>, u32, String, String)> for ActionInfo {
    fn from((file, line, function, source): (Option<String>, u32, String, String)) -> Self {
        Self {
            file,
            line,
            function,
            source,
        }
    }
}

impl fmt::Display for ActionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file.as_deref().unwrap_or("<unknown>");
        write!(f, "Line {} of file {}:", self.line, file)?;
        for line in self.source.split('\n') {
            write!(f, "\n    {line}")?;
        }
        Ok(())
    }
}

/// Two or more registrations produced the same discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictError {
    pub discriminator: String,
    /// Colliding sites, earliest registration first.
    pub sites: Vec<ActionInfo>,
}

impl ConflictError {
    /// Creates a conflict on `discriminator` between `sites`.
    pub fn new(discriminator: impl Into<String>, sites: Vec<ActionInfo>) -> Self {
        Self {
            discriminator: discriminator.into(),
            sites,
        }
    }
}

impl fmt::Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Conflicting configuration actions\n  For: {}",
            self.discriminator
        )?;
        for site in &self.sites {
            for line in site.to_string().trim_end().split('\n') {
                write!(f, "\n    {line}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConflictError {}
