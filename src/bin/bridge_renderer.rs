// Bridge: Shapes and Renderers
// Shapes hold a renderer instead of multiplying into VectorSquare,
// RasterSquare, VectorTriangle, ...

use colored::Colorize;
use std::fmt;

// =============================================================================
// Milestone 1: The renderer side of the bridge
// =============================================================================

trait Renderer {
    fn what_to_render_as(&self) -> &str;
}

struct VectorRenderer;

impl Renderer for VectorRenderer {
    fn what_to_render_as(&self) -> &str {
        "lines"
    }
}

struct RasterRenderer;

impl Renderer for RasterRenderer {
    fn what_to_render_as(&self) -> &str {
        "pixels"
    }
}

// =============================================================================
// Milestone 2: Shapes
// =============================================================================

struct Shape {
    name: &'static str,
    renderer: Box<dyn Renderer>,
}

impl Shape {
    fn new(name: &'static str, renderer: impl Renderer + 'static) -> Self {
        Self {
            name,
            renderer: Box::new(renderer),
        }
    }

    fn triangle(renderer: impl Renderer + 'static) -> Self {
        Self::new("triangle", renderer)
    }

    fn square(renderer: impl Renderer + 'static) -> Self {
        Self::new("square", renderer)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Drawing {} as {}",
            self.name,
            self.renderer.what_to_render_as()
        )
    }
}

// =============================================================================
// Example usage
// =============================================================================

fn main() {
    println!("{}", "=== Bridge ===".bold());
    let shapes = [
        Shape::square(VectorRenderer),
        Shape::square(RasterRenderer),
        Shape::triangle(VectorRenderer),
        Shape::triangle(RasterRenderer),
    ];
    for shape in &shapes {
        println!("{shape}");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderers() {
        assert_eq!(VectorRenderer.what_to_render_as(), "lines");
        assert_eq!(RasterRenderer.what_to_render_as(), "pixels");
    }

    #[test]
    fn test_every_shape_renderer_pair() {
        assert_eq!(Shape::square(VectorRenderer).to_string(), "Drawing square as lines");
        assert_eq!(Shape::square(RasterRenderer).to_string(), "Drawing square as pixels");
        assert_eq!(Shape::triangle(VectorRenderer).to_string(), "Drawing triangle as lines");
        assert_eq!(Shape::triangle(RasterRenderer).to_string(), "Drawing triangle as pixels");
    }

    #[test]
    fn test_custom_renderer_plugs_in() {
        struct AsciiRenderer;

        impl Renderer for AsciiRenderer {
            fn what_to_render_as(&self) -> &str {
                "characters"
            }
        }

        assert_eq!(
            Shape::square(AsciiRenderer).to_string(),
            "Drawing square as characters"
        );
    }
}
