//! Declaration input: the already structured list of parameter types and
//! handler declarations the generator consumes.
mod load;
mod types;

pub use load::*;
pub use types::*;
