// Prototype: Deep Copy of a Line
// `deep_copy` builds new points rather than sharing the originals.

use colored::Colorize;
use std::fmt;

#[derive(Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl Point {
    fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn deep_copy(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, PartialEq)]
struct Line {
    start: Point,
    end: Point,
}

impl Line {
    fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    fn deep_copy(&self) -> Line {
        Line::new(self.start.deep_copy(), self.end.deep_copy())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A line that starts at {} and ends at {}", self.start, self.end)
    }
}

fn main() {
    let line1 = Line::new(Point::new(2, 4), Point::new(5, 7));
    let mut line2 = line1.deep_copy();
    line2.start = Point::new(6, 2);
    line2.end = Point::new(0, 0);

    println!("{}", "=== Prototype ===".bold());
    println!("{line1}");
    println!("{line2}");
}
