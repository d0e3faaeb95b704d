//! chem-core: Motor de resolución de compuestos (nombre → CAS, IUPAC, SMILES)
pub mod audit;
pub mod cache;
pub mod cancel;
pub mod constants;
pub mod correction;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod ports;
pub mod properties;
pub mod resolver;

pub use audit::{audit_duplicates, find_inconsistent_cas, DuplicateCasFinding, DuplicateMember};
pub use cache::{BatchCaches, CasCache, IdentityCache};
pub use cancel::CancelFlag;
pub use correction::{CorrectionTable, ExpectedCasTable};
pub use engine::{EngineBuilder, ResolutionEngine};
pub use errors::LookupError;
pub use event::{InMemoryWarningSink, WarningEvent, WarningSink};
pub use hashing::batch_fingerprint;
pub use ports::{CasLookupPort, NameLookupHit, NameLookupPort, PropertyComputationPort, PropertyTable};
pub use properties::PropertyStage;
pub use resolver::{LookupResolver, Resolution};
