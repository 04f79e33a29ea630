//! CSS color handling for the canvas renderer.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses `#rgb`, `#rrggbb` and `rgb()`/`rgba()` notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			if !hex.is_ascii() {
				return None;
			}
			return match hex.len() {
				3 => {
					let digit = |i: usize| {
						u8::from_str_radix(&hex[i..i + 1], 16)
							.ok()
							.map(|v| v * 17)
					};
					Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
				}
				6 => {
					let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
					Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?))
				}
				_ => None,
			};
		}

		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
		if parts.len() < 3 {
			return None;
		}
		let a = match parts.get(3) {
			Some(a) => a.parse().ok()?,
			None => 1.0,
		};
		Some(Self::rgba(
			parts[0].parse().ok()?,
			parts[1].parse().ok()?,
			parts[2].parse().ok()?,
			a,
		))
	}
}
