pub mod download;
pub mod time;

/// Shorten long text for a table cell, keeping whole characters.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Fractions", 20), "Fractions");
        assert_eq!(truncate("गणित के प्रश्न", 4), "गणित…");
    }
}
