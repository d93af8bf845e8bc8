//! Value-to-visual mappings shared by the layout and the renderer.

/// Group palette, in group order starting at group 1.
pub const GROUP_PALETTE: &[(&str, &str)] = &[
	("#4299E1", "Entertainment"),
	("#ECC94B", "Music"),
	("#48BB78", "Delivery"),
	("#ED8936", "News"),
	("#9F7AEA", "Wellness"),
];

/// Square-root scale with a floor, so bubble area tracks value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
	factor: f64,
	min: f64,
}

impl SqrtScale {
	/// `radius = max(sqrt(value) * factor, min)`.
	pub const fn new(factor: f64, min: f64) -> Self {
		Self { factor, min }
	}

	/// Radius for a value; missing, non-positive and non-finite values get the floor.
	pub fn radius(&self, value: Option<f64>) -> f64 {
		match value {
			Some(v) if v.is_finite() && v > 0.0 => (v.sqrt() * self.factor).max(self.min),
			_ => self.min,
		}
	}
}

fn palette_slot(group: u32) -> usize {
	let len = GROUP_PALETTE.len();
	(group as usize % len + len - 1) % len
}

/// Ordinal color for a group. Groups beyond the palette wrap around.
pub fn group_color(group: u32) -> &'static str {
	GROUP_PALETTE[palette_slot(group)].0
}

/// Legend name for a group, if it is one of the known categories.
pub fn group_name(group: u32) -> Option<&'static str> {
	let index = usize::try_from(group).ok()?.checked_sub(1)?;
	GROUP_PALETTE.get(index).map(|(_, name)| *name)
}

/// Stroke opacity of a link.
pub fn link_opacity(weight: f64) -> f64 {
	weight.clamp(0.0, 1.0)
}

/// Stroke width of a link.
pub fn link_width(weight: f64) -> f64 {
	weight.max(0.0).sqrt() * 2.0
}
