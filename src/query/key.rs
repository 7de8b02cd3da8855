use std::fmt;

/// One component of a [`QueryKey`].
///
/// Floats are stored as their bit pattern so keys stay `Eq + Hash`; `-0.0`
/// is folded into `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Text(String),
    Integer(i64),
    Float(u64),
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for KeyPart {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for KeyPart {
    fn from(value: f64) -> Self {
        let value = if value == 0.0 { 0.0 } else { value };
        Self::Float(value.to_bits())
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{:?}", text),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
        }
    }
}

/// Ordered cache key: operation name followed by the parameters that vary
/// the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    operation: &'static str,
    parts: Vec<KeyPart>,
}

impl QueryKey {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            parts: Vec::new(),
        }
    }

    pub fn with(mut self, part: impl Into<KeyPart>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}", self.operation)?;
        for part in &self.parts {
            write!(f, ", {}", part)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parts_are_ordered() {
        let a = QueryKey::new("placesByCoordinates").with(41.3851).with(2.1734);
        let b = QueryKey::new("placesByCoordinates").with(2.1734).with(41.3851);
        assert_ne!(a, b);
    }

    #[test]
    fn test_operation_separates_equal_parameters() {
        let a = QueryKey::new("countriesByRegion").with("europe");
        let b = QueryKey::new("destinationsByRegion").with("europe");
        assert_ne!(a, b);

        let set: HashSet<_> = [a.clone(), b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        assert_eq!(KeyPart::from(-0.0), KeyPart::from(0.0));
    }

    #[test]
    fn test_display() {
        let key = QueryKey::new("cityAttractions")
            .with("Paris")
            .with(48.8566)
            .with(2.3522);
        assert_eq!(key.to_string(), r#"["cityAttractions", "Paris", 48.8566, 2.3522]"#);

        let key = QueryKey::new("placesByCoordinates").with(1.5).with(2.5).with(5000u32);
        assert_eq!(key.to_string(), r#"["placesByCoordinates", 1.5, 2.5, 5000]"#);
    }
}
