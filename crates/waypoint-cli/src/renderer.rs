//! Terminal output for the markdown produced by `waypoint-core` display types.
//!
//! Rich mode styles inline markdown with termimad and keeps heading markers
//! visible so trip, day and activity levels stay distinguishable. Plain mode
//! prints the markdown untouched, which is what scripts and tests read.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match heading_color(line) {
                Some(code) => println!("\x1b[{code}m{line}\x1b[0m"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// ANSI color for a heading line: trips in blue, sections in cyan, days in
/// green.
fn heading_color(line: &str) -> Option<u8> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || !line[level..].starts_with(' ') {
        return None;
    }
    Some(match level {
        1 => 34,
        2 => 36,
        _ => 32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# 1. Trip\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_heading_color_by_level() {
        assert_eq!(heading_color("# 1. Kyoto"), Some(34));
        assert_eq!(heading_color("## Itinerary"), Some(36));
        assert_eq!(heading_color("### Day 1 · Sat 2024-06-01 (day ID: 1)"), Some(32));
        assert_eq!(heading_color("#hashtag"), None);
        assert_eq!(heading_color("- **Budget**: 10.00"), None);
    }
}
