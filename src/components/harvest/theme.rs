//! Visual theming for the harvest canvas.
//!
//! Vertex colors come from the graph; the theme only styles everything
//! around them.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Base fill, and the outer color of the gradient.
	pub color: Color,
	/// Centre color of the radial gradient.
	pub color_secondary: Color,
	/// Radial gradient instead of a flat fill.
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Vine style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Color of unselected vines.
	pub color: Color,
	/// Color of the selected vine.
	pub selected_color: Color,
}

/// Fruit style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Shade the fill from the lighter to the darker variant of the vertex color.
	pub use_gradient: bool,
	/// Stroke around unselected fruits.
	pub border_color: Color,
	/// Border stroke width in screen pixels.
	pub border_width: f64,
	/// Title text color.
	pub label_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name used by [`Theme::by_name`].
	pub name: &'static str,
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Vines.
	pub edge: EdgeStyle,
	/// Fruits.
	pub node: NodeStyle,
}

impl Theme {
	/// Dark theme with soft gradients (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
				vignette: 0.15,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.6),
				selected_color: Color::rgba(230, 235, 240, 0.9),
			},
			node: NodeStyle {
				use_gradient: true,
				border_color: Color::rgba(255, 255, 255, 0.9),
				border_width: 2.0,
				label_color: Color::rgba(255, 255, 255, 0.85),
			},
		}
	}

	/// Flat white sheet, closest to a plain SVG drawing.
	pub fn paper() -> Self {
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
				vignette: 0.0,
			},
			edge: EdgeStyle {
				color: Color::rgba(120, 120, 120, 0.8),
				selected_color: Color::rgb(40, 40, 40),
			},
			node: NodeStyle {
				use_gradient: false,
				border_color: Color::rgb(255, 255, 255),
				border_width: 2.0,
				label_color: Color::rgb(50, 50, 50),
			},
		}
	}

	/// Look up a built-in theme: `default` or `paper`.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"default" => Some(Self::default_theme()),
			"paper" => Some(Self::paper()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn themes_by_name() {
		assert_eq!(Theme::by_name("paper").map(|t| t.name), Some("paper"));
		assert!(Theme::by_name("neon").is_none());
	}
}
