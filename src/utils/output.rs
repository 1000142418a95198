use crate::cli::ListFormat;
use crate::core::data::{Category, Prompt, PromptStats};
use crate::core::state::{GalleryView, Highlights};
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::{format_datetime, format_tags_comma, format_tags_hash, truncate_string};
use colored::*;

const PREVIEW_WIDTH: usize = 80;

pub struct OutputStyle;

impl OutputStyle {
    // Primary colors for different field types
    pub fn title_text(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn content(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn tags(text: &str) -> ColoredString {
        text.bright_cyan()
    }

    pub fn tag(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn favorite_marker(prompt: &Prompt) -> ColoredString {
        if prompt.is_favorite {
            "★".yellow()
        } else {
            " ".clear()
        }
    }

    // Formatting helpers
    pub fn separator() -> String {
        "─".repeat(50)
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>12}: {}", Self::label(label), color_fn(value));
    }

    /// One-line summary: `★ Title [Category] #tags preview (used N×)`
    pub fn format_prompt_line(prompt: &Prompt) -> String {
        let uses = if prompt.use_count > 0 {
            Self::muted(&format!(" (used {}×)", prompt.use_count)).to_string()
        } else {
            String::new()
        };

        format!(
            "{} {} {}{}{}{}",
            Self::favorite_marker(prompt),
            Self::title_text(&prompt.title),
            Self::tag(&format!("[{}] ", prompt.category)),
            Self::tags(&format_tags_hash(&prompt.tags)),
            Self::content(&truncate_string(&prompt.content, PREVIEW_WIDTH)),
            uses
        )
    }

    pub fn print_prompt_detailed(prompt: &Prompt) {
        println!("{}", Self::title("📝 Prompt Details"));

        Self::print_field_colored("ID", &prompt.id, Self::muted);
        Self::print_field_colored("Title", &prompt.title, Self::title_text);
        Self::print_field_colored("Category", prompt.category.as_str(), Self::tag);
        Self::print_field_colored("Tags", &format_tags_comma(&prompt.tags), Self::tags);
        Self::print_field_colored(
            "Favorite",
            if prompt.is_favorite { "yes" } else { "no" },
            Self::info,
        );
        Self::print_field_colored("Uses", &prompt.use_count.to_string(), Self::info);
        Self::print_field_colored("Last used", &format_datetime(&prompt.last_used), Self::muted);
        Self::print_field_colored("Created", &format_datetime(&prompt.created_at), Self::muted);
        Self::print_field_colored("Updated", &format_datetime(&prompt.updated_at), Self::muted);

        println!("\n{}:", Self::title("📄 Content"));
        println!("{}", Self::content(&prompt.content));
    }

    /// Print prompt content framed for copying
    pub fn print_rendered_content(content: &str) {
        println!("{}", Self::header_separator());
        println!("{}", Self::content(content));
        println!("{}", Self::header_separator());
    }
}

// Utility functions for common patterns
pub fn print_prompt_count(shown: usize, total: usize) {
    if shown == 0 {
        println!("{}", OutputStyle::muted("No prompts found."));
    } else if shown == total {
        println!(
            "📝 {} ({} found)",
            OutputStyle::header("Prompts"),
            OutputStyle::info(&shown.to_string())
        );
    } else {
        println!(
            "📝 {} ({} of {})",
            OutputStyle::header("Prompts"),
            OutputStyle::info(&shown.to_string()),
            total
        );
    }
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", OutputStyle::warning(message));
}

pub fn print_success(message: &str) {
    println!("✅ {}", OutputStyle::success(message));
}

/// Display formatter for different output formats
pub struct DisplayFormatter;

impl DisplayFormatter {
    /// Render a derived gallery view
    pub fn print_view(view: &GalleryView, format: &ListFormat) -> AppResult<()> {
        if let ListFormat::Json = format {
            return Self::print_json(&view.filtered);
        }

        print_prompt_count(view.filtered.len(), view.total);
        match format {
            ListFormat::Simple => Self::print_simple_list(&view.filtered),
            ListFormat::Detailed => Self::print_detailed_list(&view.filtered),
            ListFormat::Json => {}
        }
        Ok(())
    }

    pub fn print_highlights(highlights: &Highlights) {
        if highlights.is_empty() {
            return;
        }

        if !highlights.favorites.is_empty() {
            println!("\n⭐ {}", OutputStyle::header("Favorites"));
            for prompt in &highlights.favorites {
                println!("  {}", OutputStyle::title_text(&prompt.title));
            }
        }

        if !highlights.frequent.is_empty() {
            println!("\n🔥 {}", OutputStyle::header("Most used"));
            for prompt in &highlights.frequent {
                println!(
                    "  {} {}",
                    OutputStyle::title_text(&prompt.title),
                    OutputStyle::muted(&format!("used {} times", prompt.use_count))
                );
            }
        }
    }

    /// Print prompt statistics
    pub fn print_stats(stats: &PromptStats) {
        OutputStyle::print_header("📊 Prompt Statistics");

        OutputStyle::print_field_colored("Prompts", &stats.total_prompts.to_string(), OutputStyle::info);
        OutputStyle::print_field_colored("Favorites", &stats.total_favorites.to_string(), OutputStyle::info);
        OutputStyle::print_field_colored("Tags", &stats.total_tags.to_string(), OutputStyle::info);
        OutputStyle::print_field_colored("Uses", &stats.total_uses.to_string(), OutputStyle::info);

        if !stats.tag_counts.is_empty() {
            println!("\n🏷️  {}:", OutputStyle::header("Most used tags"));
            let mut sorted_tags: Vec<_> = stats.tag_counts.iter().collect();
            sorted_tags.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

            for (tag, count) in sorted_tags.iter().take(10) {
                println!("  {}: {}", OutputStyle::tags(tag), OutputStyle::info(&count.to_string()));
            }
        }

        if !stats.category_counts.is_empty() {
            println!("\n📁 {}:", OutputStyle::header("Categories"));
            for category in Category::ALL {
                if let Some(count) = stats.category_counts.get(category.as_str()) {
                    println!("  {}: {}", OutputStyle::tag(category.as_str()), OutputStyle::info(&count.to_string()));
                }
            }
        }
    }

    /// Print tags list
    pub fn print_tags(tags: &[String]) {
        if tags.is_empty() {
            println!("{}", OutputStyle::muted("No tags found"));
            return;
        }

        println!("🏷️  Available Tags ({})", tags.len());
        println!("====================");
        for tag in tags {
            println!("  {}", tag);
        }
    }

    fn print_simple_list(prompts: &[Prompt]) {
        println!("{}", OutputStyle::separator());
        for prompt in prompts {
            println!("{}", OutputStyle::format_prompt_line(prompt));
        }
    }

    fn print_detailed_list(prompts: &[Prompt]) {
        for (i, prompt) in prompts.iter().enumerate() {
            println!();
            OutputStyle::print_prompt_detailed(prompt);
            if i + 1 < prompts.len() {
                println!("{}", OutputStyle::separator());
            }
        }
    }

    fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> AppResult<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::System(format!("Failed to serialize prompts to JSON: {}", e)))?;
        println!("{}", json);
        Ok(())
    }
}
