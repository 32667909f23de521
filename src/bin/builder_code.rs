// Code Builder
// A mutable, chainable builder that renders a class with a constructor
// assigning each field.

use colored::Colorize;
use std::fmt;

const INDENT_SIZE: usize = 2;

// =============================================================================
// Milestone 1: Accumulating fields
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct CodeBuilder {
    class_name: String,
    fields: Vec<String>,
}

impl CodeBuilder {
    fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: Vec::new(),
        }
    }

    fn add_field(&mut self, name: impl Into<String>) -> &mut Self {
        self.fields.push(name.into());
        self
    }
}

// =============================================================================
// Milestone 2: Rendering
// =============================================================================

impl fmt::Display for CodeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = " ".repeat(INDENT_SIZE);

        writeln!(f, "class {} {{", self.class_name)?;
        if !self.fields.is_empty() {
            writeln!(f, "{indent}constructor({}) {{", self.fields.join(", "))?;
            for field in &self.fields {
                writeln!(f, "{indent}{indent}this.{field} = {field};")?;
            }
            writeln!(f, "{indent}}}")?;
        }
        write!(f, "}}")
    }
}

// =============================================================================
// Example usage
// =============================================================================

fn main() {
    let mut cb = CodeBuilder::new("Person");
    cb.add_field("name").add_field("hairStyle");

    println!("{}", "=== Generated class ===".bold());
    println!("{cb}");
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_class() {
        let cb = CodeBuilder::new("Empty");
        assert_eq!(cb.to_string(), "class Empty {\n}");
    }

    #[test]
    fn test_class_with_fields() {
        let mut cb = CodeBuilder::new("Person");
        cb.add_field("name").add_field("hairStyle");

        let expected = "class Person {\n  constructor(name, hairStyle) {\n    this.name = name;\n    this.hairStyle = hairStyle;\n  }\n}";
        assert_eq!(cb.to_string(), expected);
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let mut cb = CodeBuilder::new("Point");
        cb.add_field("y").add_field("x");
        assert_eq!(cb.fields, vec!["y", "x"]);
    }
}
