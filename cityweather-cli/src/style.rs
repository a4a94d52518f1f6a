use cityweather_core::Category;

pub const RESET: &str = "\x1b[0m";

const RED: &str = "\x1b[1;31m";
const BLUE: &str = "\x1b[1;34m";
const CYAN: &str = "\x1b[1;36m";
const YELLOW: &str = "\x1b[33m";
const WHITE: &str = "\x1b[37m";

/// ANSI color used for a category's list line.
pub fn color(category: Category) -> &'static str {
    match category {
        Category::Thunderstorm => RED,
        Category::Drizzle => CYAN,
        Category::Rain | Category::Atmosphere => BLUE,
        Category::Snow | Category::Clouds => WHITE,
        Category::Clear => YELLOW,
        Category::Unknown => RESET,
    }
}

pub fn paint(text: &str, category: Category) -> String {
    format!("{}{text}{RESET}", color(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_and_resets() {
        assert_eq!(paint("x", Category::Thunderstorm), "\x1b[1;31mx\x1b[0m");
        assert_eq!(paint("x", Category::Unknown), "\x1b[0mx\x1b[0m");
    }
}
