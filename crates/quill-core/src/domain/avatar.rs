use serde::{Deserialize, Serialize};

/// Background color of a user's avatar badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvatarColor {
    Red500,
    Blue500,
    Green500,
    Purple500,
    Pink500,
    Gray500,
    Indigo500,
    Teal500,
    /// Used when there is nothing to hash.
    Gray700,
}

const PALETTE: [AvatarColor; 8] = [
    AvatarColor::Red500,
    AvatarColor::Blue500,
    AvatarColor::Green500,
    AvatarColor::Purple500,
    AvatarColor::Pink500,
    AvatarColor::Gray500,
    AvatarColor::Indigo500,
    AvatarColor::Teal500,
];

impl AvatarColor {
    /// Deterministic color for `value`: the same e-mail always gets the same color.
    ///
    /// Hashes UTF-16 code units with `hash = c + (hash << 5) - hash`, where the
    /// shift wraps to 32 bits but the subtraction does not. Clients that render
    /// avatars with the same scheme agree on the color.
    pub fn for_value(value: &str) -> Self {
        if value.is_empty() {
            return Self::Gray700;
        }

        let mut hash: i64 = 0;
        for unit in value.encode_utf16() {
            let shifted = i64::from((hash as i32).wrapping_shl(5));
            hash = i64::from(unit) + shifted - hash;
        }

        PALETTE[(hash.unsigned_abs() % PALETTE.len() as u64) as usize]
    }

    /// CSS utility class for the color.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Red500 => "bg-red-500",
            Self::Blue500 => "bg-blue-500",
            Self::Green500 => "bg-green-500",
            Self::Purple500 => "bg-purple-500",
            Self::Pink500 => "bg-pink-500",
            Self::Gray500 => "bg-gray-500",
            Self::Indigo500 => "bg-indigo-500",
            Self::Teal500 => "bg-teal-500",
            Self::Gray700 => "bg-gray-700",
        }
    }
}
