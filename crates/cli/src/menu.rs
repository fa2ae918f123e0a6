//! Interpretation of the answers typed at the interactive menus. Anything
//! unrecognised selects the default.

use digest_core::{Audience, BodyStyle, Tone, MAX_COUNT};

/// Audiences offered by number, in menu order.
pub const AUDIENCE_MENU: [Audience; 3] = [
    Audience::Management,
    Audience::TechnicalTeam,
    Audience::GeneralAudience,
];

pub const TONE_MENU: [Tone; 3] = [Tone::Neutral, Tone::Formal, Tone::Concise];

fn by_number<T: Copy>(input: &str, menu: &[T]) -> Option<T> {
    let n: usize = input.trim().parse().ok()?;
    n.checked_sub(1).and_then(|i| menu.get(i).copied())
}

pub fn audience_choice(input: &str, default: Audience) -> Audience {
    by_number(input, &AUDIENCE_MENU)
        .or_else(|| Audience::from_name(input))
        .unwrap_or(default)
}

pub fn tone_choice(input: &str, default: Tone) -> Tone {
    by_number(input, &TONE_MENU)
        .or_else(|| Tone::from_name(input))
        .unwrap_or(default)
}

pub fn style_choice(input: &str, default: BodyStyle) -> BodyStyle {
    if let Some(style) = by_number(input, &BodyStyle::ALL) {
        return style;
    }
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return default;
    }
    match BodyStyle::ALL.into_iter().find(|s| s.as_str() == trimmed) {
        Some(style) => style,
        None => default,
    }
}

/// An integer in `1..=MAX_COUNT`, or `default` for anything else.
pub fn count_choice(input: &str, default: usize) -> usize {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return default;
    }
    match trimmed.parse::<usize>() {
        Ok(n) if (1..=MAX_COUNT).contains(&n) => n,
        _ => default,
    }
}

/// Menu line for an option, marking the default.
pub fn menu_label(label: &str, is_default: bool) -> String {
    if is_default {
        format!("{label} (default)")
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audience_by_number_name_or_default() {
        assert_eq!(audience_choice("1", Audience::Executives), Audience::Management);
        assert_eq!(audience_choice("2", Audience::Management), Audience::TechnicalTeam);
        assert_eq!(audience_choice(" 3 ", Audience::Management), Audience::GeneralAudience);
        assert_eq!(audience_choice("", Audience::Management), Audience::Management);
        assert_eq!(audience_choice("4", Audience::Management), Audience::Management);
        assert_eq!(audience_choice("0", Audience::Management), Audience::Management);
        assert_eq!(audience_choice("executives", Audience::Management), Audience::Executives);
    }

    #[test]
    fn tone_choices() {
        assert_eq!(tone_choice("2", Tone::Neutral), Tone::Formal);
        assert_eq!(tone_choice("3", Tone::Neutral), Tone::Concise);
        assert_eq!(tone_choice("x", Tone::Formal), Tone::Formal);
    }

    #[test]
    fn style_choices() {
        assert_eq!(style_choice("1", BodyStyle::ProsCons), BodyStyle::KeyFindings);
        assert_eq!(style_choice("3", BodyStyle::KeyFindings), BodyStyle::RisksMitigations);
        assert_eq!(style_choice("4", BodyStyle::KeyFindings), BodyStyle::MetricsTrends);
        assert_eq!(style_choice("pros_cons", BodyStyle::KeyFindings), BodyStyle::ProsCons);
        assert_eq!(style_choice("9", BodyStyle::KeyFindings), BodyStyle::KeyFindings);
        assert_eq!(style_choice("", BodyStyle::MetricsTrends), BodyStyle::MetricsTrends);
    }

    #[test]
    fn counts_must_be_positive_digits() {
        assert_eq!(count_choice("5", 3), 5);
        assert_eq!(count_choice("", 3), 3);
        assert_eq!(count_choice("0", 3), 3);
        assert_eq!(count_choice("-2", 3), 3);
        assert_eq!(count_choice("2.5", 3), 3);
        assert_eq!(count_choice("four", 3), 3);
    }

    #[test]
    fn counts_above_limit_use_default() {
        assert_eq!(count_choice(&MAX_COUNT.to_string(), 3), MAX_COUNT);
        assert_eq!(count_choice(&(MAX_COUNT + 1).to_string(), 3), 3);
        assert_eq!(count_choice("4000000000", 3), 3);
        assert_eq!(count_choice("99999999999999999999999", 3), 3);
    }

    #[test]
    fn labels_mark_default() {
        assert_eq!(menu_label("neutral", true), "neutral (default)");
        assert_eq!(menu_label("formal", false), "formal");
    }
}
