// Decorator: Dragon
// A dragon flies like a bird and crawls like a lizard by wrapping one of
// each and keeping their ages in sync.

use colored::Colorize;

// =============================================================================
// Milestone 1: The wrapped creatures
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Bird {
    age: u32,
}

impl Bird {
    fn new(age: u32) -> Self {
        Self { age }
    }

    fn fly(&self) -> &'static str {
        if self.age < 10 {
            "flying"
        } else {
            "too old"
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Lizard {
    age: u32,
}

impl Lizard {
    fn new(age: u32) -> Self {
        Self { age }
    }

    fn crawl(&self) -> &'static str {
        if self.age > 1 {
            "crawling"
        } else {
            "too young"
        }
    }
}

// =============================================================================
// Milestone 2: The decorator
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Dragon {
    bird: Bird,
    lizard: Lizard,
}

impl Dragon {
    fn new(age: u32) -> Self {
        Self {
            bird: Bird::new(age),
            lizard: Lizard::new(age),
        }
    }

    fn age(&self) -> u32 {
        self.bird.age
    }

    // Both halves must see the new age.
    fn set_age(&mut self, age: u32) {
        self.bird.age = age;
        self.lizard.age = age;
    }

    fn fly(&self) -> &'static str {
        self.bird.fly()
    }

    fn crawl(&self) -> &'static str {
        self.lizard.crawl()
    }
}

// =============================================================================
// Example usage
// =============================================================================

fn main() {
    let lizard = Lizard::new(3);
    println!("{}", "=== Lizard ===".bold());
    println!("{}", lizard.crawl());

    let mut dragon = Dragon::new(10);
    println!("\n{}", "=== Dragon (age 10) ===".bold());
    println!("{}", dragon.fly());
    println!("{}", dragon.crawl());

    dragon.set_age(1);
    println!("\n{}", format!("=== Dragon (age {}) ===", dragon.age()).bold());
    println!("{}", dragon.fly());
    println!("{}", dragon.crawl());
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_flies_while_young() {
        assert_eq!(Bird::new(9).fly(), "flying");
        assert_eq!(Bird::new(10).fly(), "too old");
    }

    #[test]
    fn test_lizard_crawls_once_grown() {
        assert_eq!(Lizard::new(1).crawl(), "too young");
        assert_eq!(Lizard::new(2).crawl(), "crawling");
    }

    #[test]
    fn test_dragon_reuses_both() {
        let dragon = Dragon::new(5);
        assert_eq!(dragon.fly(), "flying");
        assert_eq!(dragon.crawl(), "crawling");

        let old = Dragon::new(10);
        assert_eq!(old.fly(), "too old");
        assert_eq!(old.crawl(), "crawling");
    }

    #[test]
    fn test_set_age_updates_both_halves() {
        let mut dragon = Dragon::new(10);
        dragon.set_age(0);

        assert_eq!(dragon.age(), 0);
        assert_eq!(dragon.bird.age, 0);
        assert_eq!(dragon.lizard.age, 0);
        assert_eq!(dragon.fly(), "flying");
        assert_eq!(dragon.crawl(), "too young");
    }

    #[test]
    fn test_default_dragon_is_newborn() {
        assert_eq!(Dragon::default(), Dragon::new(0));
    }
}
