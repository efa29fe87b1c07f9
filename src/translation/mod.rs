/*!
 * Cell translation.
 *
 * - `placeholders`: protecting `{token}` placeholders with positional markers
 * - `symbolic`: detecting cells with nothing to translate
 * - `cache`: in-run translation cache
 * - `core`: provider-backed translation service
 * - `transform`: per-cell translation with failure isolation
 */

pub use self::cache::{CacheStats, TranslationCache};
pub use self::core::TranslationService;
pub use self::placeholders::{PlaceholderSet, Restoration};
pub use self::symbolic::{is_symbolic_only, is_symbolic_text};
pub use self::transform::{CellOutcome, CellTranslator};

pub mod cache;
pub mod core;
pub mod placeholders;
pub mod symbolic;
pub mod transform;
