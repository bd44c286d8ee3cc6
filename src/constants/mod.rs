//! Tuning constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Every value here is the default for the matching field of
//! [`crate::config::Tuning`]; data files may override them.

mod ambush;
mod boss;
mod gameplay;
mod projectile;
mod sentinel;
mod vision;

pub use ambush::*;
pub use boss::*;
pub use gameplay::*;
pub use projectile::*;
pub use sentinel::*;
pub use vision::*;
