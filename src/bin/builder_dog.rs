// Staged Fluent Builder
// One builder owns the dog under construction; the `is` and `loves` stages
// are short-lived views over it, so switching stages never loses anything.

use colored::Colorize;
use std::fmt;
use std::mem;
use tracing::debug;

/* ============================================================
 * Milestone 1: The target
 * ============================================================
 */

#[derive(Debug, Clone, PartialEq)]
struct Dog {
    name: String,
    breed: String,
    is_female: bool,
    age: i32,
    favorite_activities: Vec<String>,
}

impl Default for Dog {
    fn default() -> Self {
        Dog {
            name: String::new(),
            breed: String::new(),
            is_female: true,
            age: -1,
            favorite_activities: Vec::new(),
        }
    }
}

impl fmt::Display for Dog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "This doggy is named {} and is a {}", self.name, self.breed)?;
        write!(f, "{} loves to:", if self.is_female { "She" } else { "He" })?;
        for activity in &self.favorite_activities {
            write!(f, "\n- {activity}")?;
        }
        Ok(())
    }
}

/* ============================================================
 * Milestone 2: Builder context
 * ============================================================
 */

#[derive(Debug, Default)]
struct DogBuilder {
    dog: Dog,
}

impl DogBuilder {
    fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    fn with_dog(dog: Dog) -> Self {
        Self { dog }
    }

    /// Attribute stage: name, breed, age, sex.
    fn is(&mut self) -> DogTypeBuilder<'_> {
        DogTypeBuilder { builder: self }
    }

    /// Activity stage: favourite things to do.
    fn loves(&mut self) -> DogActivityBuilder<'_> {
        DogActivityBuilder { builder: self }
    }

    /// Hands over the dog built so far and starts a fresh one.
    fn build(&mut self) -> Dog {
        let dog = mem::take(&mut self.dog);
        debug!(
            name = %dog.name,
            activities = dog.favorite_activities.len(),
            "built dog"
        );
        dog
    }
}

/* ============================================================
 * Milestone 3: Stages
 * ============================================================
 */

struct DogTypeBuilder<'a> {
    builder: &'a mut DogBuilder,
}

impl<'a> DogTypeBuilder<'a> {
    fn named(self, name: impl Into<String>) -> Self {
        self.builder.dog.name = name.into();
        self
    }

    fn breed_type(self, breed: impl Into<String>) -> Self {
        self.builder.dog.breed = breed.into();
        self
    }

    // Any age is accepted, including negative ones.
    fn aged(self, age: i32) -> Self {
        self.builder.dog.age = age;
        self
    }

    fn male(self) -> Self {
        self.builder.dog.is_female = false;
        self
    }

    fn female(self) -> Self {
        self.builder.dog.is_female = true;
        self
    }

    fn loves(self) -> DogActivityBuilder<'a> {
        DogActivityBuilder {
            builder: self.builder,
        }
    }

    fn build(self) -> Dog {
        self.builder.build()
    }
}

struct DogActivityBuilder<'a> {
    builder: &'a mut DogBuilder,
}

impl<'a> DogActivityBuilder<'a> {
    fn to(self, activity: impl Into<String>) -> Self {
        self.builder.dog.favorite_activities.push(activity.into());
        self
    }

    fn and(self, activity: impl Into<String>) -> Self {
        self.to(activity)
    }

    fn doing<I, S>(self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder
            .dog
            .favorite_activities
            .extend(activities.into_iter().map(Into::into));
        self
    }

    fn is(self) -> DogTypeBuilder<'a> {
        DogTypeBuilder {
            builder: self.builder,
        }
    }

    fn build(self) -> Dog {
        self.builder.build()
    }
}

/* ============================================================
 * Demo (cargo run)
 * ============================================================
 */

fn main() {
    design_patterns::init_logging();

    let mut builder = DogBuilder::new();

    let princess = builder
        .is()
        .aged(4)
        .breed_type("German Shepherd")
        .named("Princess")
        .female()
        .loves()
        .to("Run")
        .and("Play Fetch")
        .and("Bark")
        .build();

    let rex = builder
        .loves()
        .doing(["Swim", "Dig"])
        .is()
        .named("Rex")
        .breed_type("Labrador")
        .male()
        .build();

    println!("{}", "== First build ==".bold());
    println!("{princess}");
    println!("\n{}", "== Same builder, second build ==".bold());
    println!("{rex}");
}

/* ============================================================
 * Tests (cargo test)
 * ============================================================
 */

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_dog() {
        let dog = Dog::default();
        assert_eq!(dog.name, "");
        assert_eq!(dog.breed, "");
        assert!(dog.is_female);
        assert_eq!(dog.age, -1);
        assert!(dog.favorite_activities.is_empty());
    }

    #[test]
    fn test_chain_across_stages() {
        let dog = DogBuilder::new()
            .is()
            .named("Rex")
            .breed_type("Lab")
            .aged(3)
            .male()
            .loves()
            .to("Swim")
            .and("Fetch")
            .build();

        assert_eq!(dog.name, "Rex");
        assert_eq!(dog.breed, "Lab");
        assert_eq!(dog.age, 3);
        assert!(!dog.is_female);
        assert_eq!(dog.favorite_activities, vec!["Swim", "Fetch"]);
    }

    #[test]
    fn test_interleaved_stages_keep_prior_changes() {
        let mut builder = DogBuilder::new();
        builder.loves().to("Sleep");
        builder.is().named("Bo");
        builder.loves().and("Eat");
        builder.is().aged(2);

        let dog = builder.build();
        assert_eq!(dog.name, "Bo");
        assert_eq!(dog.age, 2);
        assert_eq!(dog.favorite_activities, vec!["Sleep", "Eat"]);
    }

    #[test]
    fn test_build_resets_builder() {
        let mut builder = DogBuilder::new();
        let first = builder.is().named("First").loves().to("Run").build();

        let second = builder.is().named("Second").male().build();

        assert_eq!(first.name, "First");
        assert_eq!(first.favorite_activities, vec!["Run"]);
        assert!(first.is_female);

        assert_eq!(second.name, "Second");
        assert!(second.favorite_activities.is_empty());
        assert!(!second.is_female);
    }

    #[test]
    fn test_doing_appends_in_order() {
        let dog = DogBuilder::new()
            .loves()
            .to("Bark")
            .doing(vec!["A", "B", "C"])
            .build();

        assert_eq!(dog.favorite_activities, vec!["Bark", "A", "B", "C"]);
    }

    #[test]
    fn test_with_supplied_dog() {
        let existing = Dog {
            name: "Old".into(),
            favorite_activities: vec!["Nap".into()],
            ..Dog::default()
        };

        let dog = DogBuilder::with_dog(existing).loves().to("Walk").build();
        assert_eq!(dog.name, "Old");
        assert_eq!(dog.favorite_activities, vec!["Nap", "Walk"]);
    }

    #[test]
    fn test_no_validation() {
        let dog = DogBuilder::new().is().named("").aged(-20).build();
        assert_eq!(dog.name, "");
        assert_eq!(dog.age, -20);
    }

    #[test]
    fn test_sex_flag_toggles() {
        let dog = DogBuilder::new().is().male().female().build();
        assert!(dog.is_female);
    }

    #[test]
    fn test_display() {
        let dog = DogBuilder::new()
            .is()
            .named("Princess")
            .breed_type("German Shepherd")
            .loves()
            .to("Run")
            .and("Bark")
            .build();

        assert_eq!(
            dog.to_string(),
            "This doggy is named Princess and is a German Shepherd\nShe loves to:\n- Run\n- Bark"
        );
    }

    proptest! {
        #[test]
        fn prop_doing_preserves_order(
            existing in proptest::collection::vec("[a-z]{1,6}", 0..4),
            added in proptest::collection::vec("[a-z]{1,6}", 0..8),
        ) {
            let mut builder = DogBuilder::new();
            builder.loves().doing(existing.clone()).doing(added.clone());
            let dog = builder.build();

            let expected: Vec<String> = existing.into_iter().chain(added).collect();
            prop_assert_eq!(dog.favorite_activities, expected);
        }
    }
}
