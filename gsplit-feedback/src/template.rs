//! Canned feedback lines with an optional distance placeholder.

/// Placeholder replaced by the distance, formatted to whole units.
pub const DISTANCE_PLACEHOLDER: &str = "{distance_mm}";

/// One pre-written feedback line.
///
/// # Examples
///
/// ```
/// use gsplit_feedback::Template;
///
/// let template = Template::new("{distance_mm}mm from glory.");
/// assert_eq!(template.render(12.6), "13mm from glory.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template(String);

impl Template {
    /// Wrap a template string.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the template mentions the distance.
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.0.contains(DISTANCE_PLACEHOLDER)
    }

    /// Substitute `distance_mm`, rounded to 0 decimal places.
    #[must_use]
    pub fn render(&self, distance_mm: f64) -> String {
        if self.has_placeholder() {
            self.0
                .replace(DISTANCE_PLACEHOLDER, &format!("{distance_mm:.0}"))
        } else {
            self.0.clone()
        }
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Append `.` unless `text` already ends in `.`, `!` or `?`.
///
/// Surrounding whitespace is trimmed first.
#[must_use]
pub fn ensure_terminal_punctuation(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_owned()
    } else {
        format!("{trimmed}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Clinic.", 3.0, "Clinic.")]
    #[case("{distance_mm}mm. Retire.", 17.4, "17mm. Retire.")]
    #[case("Off by {distance_mm}mm.", 0.0, "Off by 0mm.")]
    fn templates_render_distance(
        #[case] raw: &str,
        #[case] distance: f64,
        #[case] expected: &str,
    ) {
        assert_eq!(Template::new(raw).render(distance), expected);
    }

    #[rstest]
    #[case("Fair play", "Fair play.")]
    #[case("Fair play!", "Fair play!")]
    #[case("Fair play?", "Fair play?")]
    #[case("  Fair play.  ", "Fair play.")]
    fn terminal_punctuation_is_enforced(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(ensure_terminal_punctuation(raw), expected);
    }
}
