pub mod bigint;
pub mod dump;
pub mod engine;
pub mod error;
pub mod math;
pub mod params;
pub mod polynomial;
pub mod rns;
pub mod vecmath;

pub use bigint::BigInt;
pub use dump::save_twiddle_table;
pub use engine::{Engine, TraceEvent};
pub use error::NttError;
pub use params::Params;
pub use polynomial::Polynomial;
pub use rns::{DirectMultiplier, ResidueMultiplier, RnsMultiplier};
