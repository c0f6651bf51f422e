pub mod banner;
pub mod defaults;
pub mod driver;
pub mod error;
pub mod fuzzing; // Positional substitution engine
pub mod models;
pub mod parsers;
pub mod remote;
pub mod reporting;
pub mod settings;

// Re-export commonly used items
pub use defaults::*;
pub use driver::*;
pub use error::*;
pub use fuzzing::*; // Re-exports patterns, substitution, cardinality, classifier
pub use models::*;
pub use parsers::*;
pub use remote::*;
pub use reporting::*;
pub use settings::*;
