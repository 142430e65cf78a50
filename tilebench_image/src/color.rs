//! Color parsing for strategy display attributes.

use anyhow::{Result, bail};

/// Fallback colors for strategies without a configured one, assigned in registration order.
pub const PALETTE: [[u8; 3]; 6] = [
	[31, 119, 180],
	[255, 127, 14],
	[44, 160, 44],
	[214, 39, 40],
	[148, 103, 189],
	[140, 86, 75],
];

/// Parses a color given as hex string or single-letter name.
///
/// Supports formats:
/// - "RGB" (3 chars) -> expands to RRGGBB
/// - "RRGGBB" (6 chars)
/// - one of the letters `b g r c m y k w`
///
/// An optional leading `#` is stripped from hex strings.
///
/// # Examples
///
/// ```
/// use tilebench_image::color::parse_color;
///
/// assert_eq!(parse_color("FF5733").unwrap(), [255, 87, 51]);
/// assert_eq!(parse_color("#F00").unwrap(), [255, 0, 0]);
/// assert_eq!(parse_color("m").unwrap(), [191, 0, 191]);
/// ```
pub fn parse_color(text: &str) -> Result<[u8; 3]> {
	let named = match text {
		"b" => Some([0, 0, 255]),
		"g" => Some([0, 128, 0]),
		"r" => Some([255, 0, 0]),
		"c" => Some([0, 191, 191]),
		"m" => Some([191, 0, 191]),
		"y" => Some([191, 191, 0]),
		"k" => Some([0, 0, 0]),
		"w" => Some([255, 255, 255]),
		_ => None,
	};
	if let Some(color) = named {
		return Ok(color);
	}

	let hex = text.trim_start_matches('#');
	if !hex.is_ascii() {
		bail!("Invalid color '{text}': expected a hex color or one of b, g, r, c, m, y, k, w");
	}

	let expanded = match hex.len() {
		3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
		6 => hex.to_string(),
		_ => bail!("Invalid color '{text}': expected 3 or 6 hex characters or one of b, g, r, c, m, y, k, w"),
	};

	let mut color = [0u8; 3];
	for (i, channel) in color.iter_mut().enumerate() {
		*channel = u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16)
			.map_err(|e| anyhow::anyhow!("Invalid color '{text}': {e}"))?;
	}
	Ok(color)
}
