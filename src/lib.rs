//! # Design Pattern Exercises
//!
//! One self-contained binary per exercise. Nothing is shared between them
//! except the logging setup below.
//!
//! ## Patterns Covered
//!
//! 1. **Bridge** - shapes decoupled from their renderers
//! 2. **Builder**
//!    - Mutable, chainable code builder
//!    - Staged fluent builder with reusable `build()`
//! 3. **Composite** - summing single and many-valued containers uniformly
//! 4. **Decorator** - a dragon built from a bird and a lizard
//! 5. **Factory** - per-factory sequential ids
//! 6. **Prototype**
//!    - Explicit deep copy
//!    - Registry-driven generic cloner behind an employee factory
//! 7. **Singleton** - checking whether a generator hands out one instance
//!
//! ## Running Examples
//!
//! ```bash
//! cargo run --bin bridge_renderer
//! cargo run --bin builder_code
//! cargo run --bin builder_dog
//! cargo run --bin composite_sum
//! cargo run --bin decorator_dragon
//! cargo run --bin factory_person
//! cargo run --bin prototype_line
//! cargo run --bin prototype_serializer [offices.toml]
//! cargo run --bin singleton_tester
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) to see what the exercises do internally.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs a `fmt` subscriber on stderr filtered by `RUST_LOG`.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
        tracing::debug!("still alive");
    }
}
