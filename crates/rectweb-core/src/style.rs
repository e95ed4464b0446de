// crates/rectweb-core/src/style.rs

use glam::Vec4;
use tracing::warn;

/// Free-form style declarations. Insertion order is kept and a repeated key
/// overwrites the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    declarations: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.declarations.iter_mut().find(|(key, _)| *key == property) {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((property, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Normalizes `[r, g, b]` or `[r, g, b, a]` (channels 0-255, alpha 0-1).
///
/// Anything else is logged and dropped: a missing color only degrades the
/// presentation, so it never aborts a build.
pub fn normalize_color(components: &[f64]) -> Option<Vec4> {
    let (r, g, b, a) = match *components {
        [r, g, b] => (r, g, b, 1.0),
        [r, g, b, a] => (r, g, b, a),
        _ => {
            warn!("Ignoring color with {} components, expected 3 or 4", components.len());
            return None;
        }
    };

    let channel_ok = |c: f64| c.is_finite() && (0.0..=255.0).contains(&c);
    if !(channel_ok(r) && channel_ok(g) && channel_ok(b)) || !(a.is_finite() && (0.0..=1.0).contains(&a)) {
        warn!("Ignoring out-of-range color {:?}", components);
        return None;
    }

    Some(Vec4::new(
        (r / 255.0) as f32,
        (g / 255.0) as f32,
        (b / 255.0) as f32,
        a as f32,
    ))
}

pub fn css_color(color: Vec4) -> String {
    let channel = |c: f32| (c * 255.0).round() as u8;
    if color.w >= 1.0 {
        format!("rgb({}, {}, {})", channel(color.x), channel(color.y), channel(color.z))
    } else {
        format!(
            "rgba({}, {}, {}, {})",
            channel(color.x),
            channel(color.y),
            channel(color.z),
            color.w
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_map_last_write_wins_in_place() {
        let mut style = StyleMap::new();
        style.insert("text-decoration", "underline");
        style.insert("cursor", "pointer");
        style.insert("text-decoration", "none");

        let entries: Vec<_> = style.iter().collect();
        assert_eq!(entries, vec![("text-decoration", "none"), ("cursor", "pointer")]);
        assert_eq!(style.get("cursor"), Some("pointer"));
        assert_eq!(style.len(), 2);
    }

    #[test]
    fn test_color_normalization() {
        let color = normalize_color(&[39.0, 40.0, 34.0]).unwrap();
        assert_eq!(css_color(color), "rgb(39, 40, 34)");

        let color = normalize_color(&[255.0, 0.0, 0.0, 0.5]).unwrap();
        assert_eq!(css_color(color), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn test_malformed_colors_are_dropped() {
        assert_eq!(normalize_color(&[1.0, 2.0]), None);
        assert_eq!(normalize_color(&[1.0, 2.0, 3.0, 0.5, 9.0]), None);
        assert_eq!(normalize_color(&[300.0, 0.0, 0.0]), None);
        assert_eq!(normalize_color(&[0.0, 0.0, 0.0, 2.0]), None);
        assert_eq!(normalize_color(&[f64::NAN, 0.0, 0.0]), None);
    }
}
