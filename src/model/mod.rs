pub mod context;
pub mod decl;
pub mod param;
pub mod types;

pub use context::{ClassId, TranslationUnitContext};
pub use decl::Declaration;
pub use param::Parameter;
pub use types::{TypeDesc, precedence};
