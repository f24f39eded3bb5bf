//! HSL color values for vertices.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-step factor used by [`Hsl::lighten`] and [`Hsl::darken`].
const SHADE_STEP: f64 = 0.7;

/// Immutable HSL color.
///
/// `h` is in degrees `[0, 360)`, `s` and `l` are fractions in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
	/// Hue in degrees.
	pub h: f64,
	/// Saturation.
	pub s: f64,
	/// Lightness.
	pub l: f64,
}

impl Hsl {
	/// Build a color, wrapping the hue and clamping `s` and `l`.
	pub fn new(h: f64, s: f64, l: f64) -> Self {
		Self {
			h: h.rem_euclid(360.0),
			s: s.clamp(0.0, 1.0),
			l: l.clamp(0.0, 1.0),
		}
	}

	/// Uniformly random hue at half saturation and half lightness.
	pub fn random() -> Self {
		Self::random_with(&mut rand::thread_rng())
	}

	/// [`Hsl::random`] with a caller-supplied generator.
	pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
		Self::new(rng.gen_range(0.0..360.0), 0.5, 0.5)
	}

	/// Brighter copy: lightness scaled by `(1 / 0.7)^amount`.
	pub fn lighten(self, amount: f64) -> Self {
		Self::new(self.h, self.s, self.l * SHADE_STEP.powf(-amount))
	}

	/// Darker copy: lightness scaled by `0.7^amount`.
	pub fn darken(self, amount: f64) -> Self {
		Self::new(self.h, self.s, self.l * SHADE_STEP.powf(amount))
	}

	/// CSS `hsl()` string.
	pub fn to_css(self) -> String {
		format!(
			"hsl({:.1}, {:.1}%, {:.1}%)",
			self.h,
			self.s * 100.0,
			self.l * 100.0
		)
	}
}
