use ratatui::{prelude::*, widgets::*};

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Difficulty color
pub fn difficulty_color(difficulty: &str) -> Color {
    match difficulty.to_ascii_lowercase().as_str() {
        "easy" => Color::Green,
        "medium" => Color::Yellow,
        "hard" => Color::Red,
        _ => Color::White,
    }
}

/// Letter label for an option index (A, B, C, ...)
pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
    }

    #[test]
    fn test_difficulty_color_is_case_insensitive() {
        assert_eq!(difficulty_color("Easy"), Color::Green);
        assert_eq!(difficulty_color("HARD"), Color::Red);
        assert_eq!(difficulty_color("unknown"), Color::White);
    }
}
