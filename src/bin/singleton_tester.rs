// Singleton Tester
// A generator hands out a singleton when every call returns the very same
// instance, not merely an equal one.

use colored::Colorize;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// Milestone 1: The check
// =============================================================================

struct SingletonTester;

impl SingletonTester {
    fn is_singleton<T, F>(generator: F) -> bool
    where
        F: Fn() -> Arc<T>,
    {
        let first = generator();
        let second = generator();
        Arc::ptr_eq(&first, &second)
    }
}

// =============================================================================
// Milestone 2: Something to test against
// =============================================================================

#[derive(Debug, PartialEq)]
struct Database {
    capitals: HashMap<&'static str, &'static str>,
}

impl Database {
    fn load() -> Self {
        let capitals = [("France", "Paris"), ("Japan", "Tokyo"), ("Peru", "Lima")]
            .into_iter()
            .collect();
        Self { capitals }
    }

    fn capital(&self, country: &str) -> Option<&'static str> {
        self.capitals.get(country).copied()
    }
}

lazy_static! {
    static ref DATABASE: Arc<Database> = Arc::new(Database::load());
}

fn shared_database() -> Arc<Database> {
    Arc::clone(&DATABASE)
}

fn fresh_database() -> Arc<Database> {
    Arc::new(Database::load())
}

// =============================================================================
// Example usage
// =============================================================================

fn main() {
    println!("{}", "=== Singleton tester ===".bold());
    println!(
        "shared_database is a singleton: {}",
        SingletonTester::is_singleton(shared_database)
    );
    println!(
        "fresh_database is a singleton:  {}",
        SingletonTester::is_singleton(fresh_database)
    );
    println!(
        "capital of Japan: {}",
        shared_database().capital("Japan").unwrap_or("unknown")
    );
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_instance_is_singleton() {
        assert!(SingletonTester::is_singleton(shared_database));
    }

    #[test]
    fn test_equal_but_distinct_is_not_singleton() {
        assert_eq!(*fresh_database(), *fresh_database());
        assert!(!SingletonTester::is_singleton(fresh_database));
    }

    #[test]
    fn test_closure_over_one_instance() {
        let value = Arc::new(42);
        assert!(SingletonTester::is_singleton(|| Arc::clone(&value)));
    }

    #[test]
    fn test_database_lookup() {
        assert_eq!(shared_database().capital("Peru"), Some("Lima"));
        assert_eq!(shared_database().capital("Atlantis"), None);
    }
}
