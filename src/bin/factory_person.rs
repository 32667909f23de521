// Factory: Person Ids
// Every factory numbers the people it creates from zero.

use colored::Colorize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
struct Person {
    id: u64,
    name: String,
}

#[derive(Debug, Default)]
struct PersonFactory {
    next_id: u64,
}

impl PersonFactory {
    fn new() -> Self {
        Self::default()
    }

    fn create_person(&mut self, name: impl Into<String>) -> Person {
        let person = Person {
            id: self.next_id,
            name: name.into(),
        };
        self.next_id += 1;
        debug!(id = person.id, name = %person.name, "created person");
        person
    }
}

fn main() {
    design_patterns::init_logging();

    let mut factory = PersonFactory::new();
    let eli = factory.create_person("Eli");
    let john = factory.create_person("John");

    println!("{}", "=== Factory ===".bold());
    println!("{eli:?}");
    println!("{john:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_zero_and_increase() {
        let mut factory = PersonFactory::new();
        let first = factory.create_person("Eli");
        let second = factory.create_person("John");

        assert_eq!(first, Person { id: 0, name: "Eli".into() });
        assert_eq!(second.id, 1);
        assert_eq!(second.name, "John");
    }

    #[test]
    fn test_factories_count_independently() {
        let mut a = PersonFactory::new();
        let mut b = PersonFactory::new();

        a.create_person("a0");
        a.create_person("a1");
        let b0 = b.create_person("b0");

        assert_eq!(b0.id, 0);
        assert_eq!(a.create_person("a2").id, 2);
    }
}
