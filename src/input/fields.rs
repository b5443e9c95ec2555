/// The four numeric crop inputs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    X1,
    Y1,
    X2,
    Y2,
}

impl FieldKey {
    pub const ALL: [FieldKey; 4] = [Self::X1, Self::Y1, Self::X2, Self::Y2];

    /// Name shared by the input element and the share-URL parameter.
    pub const fn name(self) -> &'static str {
        match self {
            Self::X1 => "x1",
            Self::Y1 => "y1",
            Self::X2 => "x2",
            Self::Y2 => "y2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// Reads the leading integer of `text`, the way a browser `parseInt` without
/// a radix does.
///
/// Leading whitespace and a single sign are accepted, and a `0x`/`0X` prefix
/// switches to hexadecimal. Parsing stops at the first invalid digit. Text
/// without leading digits yields 0 and out-of-range values saturate.
pub fn parse_coordinate(text: &str) -> i32 {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    let mut value: i64 = 0;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }
    if negative {
        value = -value;
    }
    i32::try_from(value).unwrap_or(if negative { i32::MIN } else { i32::MAX })
}
