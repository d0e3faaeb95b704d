// chem-domain library entry point
pub mod batch;
pub mod compound;
pub mod error;
pub mod identifier;
pub mod warning;
pub use batch::{BatchResult, ResolvedRow};
pub use compound::{CompoundQuery, IdentitySource, ResolvedIdentity};
pub use error::DomainError;
pub use identifier::{looks_like_cas, Identifier, NOT_FOUND_TEXT};
pub use warning::{ValidationWarning, WarningKind};
