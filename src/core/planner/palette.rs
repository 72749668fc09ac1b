//! Subject color palette
//!
//! Subjects are colored by their position in the request, cycling through a
//! fixed set of gradient tokens.

/// Gradient tokens assigned to subjects in order
pub const SUBJECT_COLORS: [&str; 6] = [
    "from-[#8AC6D1] to-[#A3BFFA]",
    "from-[#FF9A8B] to-[#FFD6A5]",
    "from-[#DFF6F0] to-[#8AC6D1]",
    "from-[#E8DFF5] to-[#A3BFFA]",
    "from-[#A3BFFA] to-[#E9F0FF]",
    "from-[#FFD6A5] to-[#FF9A8B]",
];

/// Color token for the subject at `index`
#[must_use]
pub const fn subject_color(index: usize) -> &'static str {
    SUBJECT_COLORS[index % SUBJECT_COLORS.len()]
}

/// First hex color in a gradient token, for renderers that need a plain CSS color
#[must_use]
pub fn primary_hex(token: &str) -> Option<&str> {
    let start = token.find('#')?;
    let rest = &token[start..];
    let end = rest.find(']').unwrap_or(rest.len());
    Some(&rest[..end])
}
