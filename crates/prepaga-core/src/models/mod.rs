//! Domain models for the back office.

mod affiliate;
mod agenda;
mod catalog;
mod provider;
mod weekday;

pub use affiliate::*;
pub use agenda::*;
pub use catalog::*;
pub use provider::*;
pub use weekday::*;

use serde::{Deserialize, Deserializer};

/// `null` reads as the type's default. Pair with `#[serde(default)]` so a
/// missing key behaves the same.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
