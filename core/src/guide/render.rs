//! Terminal rendering for guide pages

use super::{Page, Section};
use console::Style;

/// Renders guide pages with colored output
pub struct GuideRenderer {
    bold: Style,
    cyan: Style,
    green: Style,
    yellow: Style,
    dim: Style,
}

impl Default for GuideRenderer {
    fn default() -> Self {
        Self {
            bold: Style::new().bold(),
            cyan: Style::new().cyan(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }
}

impl GuideRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the list of available pages
    pub fn print_index(&self, pages: &[Page]) {
        println!();
        println!("{}", self.bold.apply_to("Guide Pages:"));
        println!();
        for (i, page) in pages.iter().enumerate() {
            println!(
                "  {}. {} - {}",
                i + 1,
                self.cyan.apply_to(page.slug),
                page.summary
            );
        }
        println!();
        println!(
            "{}",
            self.dim.apply_to("Read a page with: aitutor guide <slug>")
        );
    }

    /// Print a full page
    pub fn print_page(&self, page: &Page) {
        println!();
        println!("{}", self.bold.apply_to(page.title));
        println!("{}", "=".repeat(page.title.len().min(72)));
        for section in page.sections {
            self.print_section(section);
        }
        println!();
    }

    fn print_section(&self, section: &Section) {
        match section {
            Section::Heading(text) => {
                println!();
                println!("{}", self.bold.apply_to(*text));
            }
            Section::Paragraph(text) => {
                println!();
                for line in wrap_text(text, 78) {
                    println!("{}", line);
                }
            }
            Section::Bullets(items) => {
                println!();
                for item in *items {
                    let mut lines = wrap_text(item, 74).into_iter();
                    if let Some(first) = lines.next() {
                        println!("  {} {}", self.green.apply_to("•"), first);
                    }
                    for rest in lines {
                        println!("    {}", rest);
                    }
                }
            }
            Section::Code { lang, text } => {
                println!();
                println!("  {}", self.dim.apply_to(format!("```{}", lang)));
                for line in text.lines() {
                    println!("  {}", self.cyan.apply_to(line));
                }
                println!("  {}", self.dim.apply_to("```"));
            }
            Section::Note(text) => {
                println!();
                let lines = wrap_text(text, 74);
                if let Some((first, rest)) = lines.split_first() {
                    println!("  {} {}", self.yellow.apply_to("Note:"), first);
                    for line in rest {
                        println!("        {}", line);
                    }
                }
            }
        }
    }
}

/// Greedy word wrap; terminal-width handling stays simple on purpose.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, 15);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 15, "line too long: {:?}", line);
        }
    }

    #[test]
    fn test_wrap_text_preserves_words() {
        let text = "alpha beta gamma";
        let joined = wrap_text(text, 8).join(" ");
        assert_eq!(joined, text);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_wrap_long_word_kept_whole() {
        let lines = wrap_text("supercalifragilistic", 5);
        assert_eq!(lines, vec!["supercalifragilistic".to_string()]);
    }
}
