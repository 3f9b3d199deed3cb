//! Terminal rendering of transcript blocks.
//!
//! `ChatRenderer` turns [`RenderBlock`]s into styled strings: prompts and
//! errors are printed verbatim, generated code goes through `syntect`.
//! Everything is returned as a `String` so the chat loop can write it above
//! the readline prompt.

use console::style;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

use thresh_core::conversation::{Notice, NoticeLevel};
use thresh_core::view::RenderBlock;
use thresh_types::config::DEFAULT_THEME;
use thresh_types::language::Language;
use thresh_types::message::MessageKind;

/// Terminal renderer with syntax highlighting.
pub struct ChatRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl ChatRenderer {
    /// Create a renderer using the named syntect theme.
    ///
    /// Unknown theme names fall back to the default theme.
    pub fn new(theme_name: &str) -> Self {
        let theme_set = ThemeSet::load_defaults();
        let theme_name = if theme_set.themes.contains_key(theme_name) {
            theme_name.to_string()
        } else {
            tracing::warn!("Unknown theme '{theme_name}', using {DEFAULT_THEME}");
            DEFAULT_THEME.to_string()
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set,
            theme_name,
        }
    }

    /// Render a list of blocks, one after another.
    pub fn render_blocks(&self, blocks: &[RenderBlock]) -> String {
        blocks
            .iter()
            .map(|b| self.render_block(b))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render one transcript block.
    pub fn render_block(&self, block: &RenderBlock) -> String {
        match block {
            RenderBlock::Text {
                number,
                time,
                kind: MessageKind::Error,
                content,
            } => format!(
                "  {} {} {}\n",
                block_header(*number, time),
                style("!").red().bold(),
                style(indent_continuation(content)).red()
            ),
            RenderBlock::Text {
                number, time, content, ..
            } => format!(
                "  {} {} {}\n",
                block_header(*number, time),
                style("You >").green().bold(),
                indent_continuation(content)
            ),
            RenderBlock::Code {
                number,
                time,
                language_label,
                highlight,
                content,
                thumbs_up_active,
                thumbs_down_active,
                ..
            } => {
                let mut output = String::new();
                output.push_str(&format!(
                    "  {} {}  {}\n",
                    block_header(*number, time),
                    style(format!("--- {language_label} ---")).cyan(),
                    style(format!("/copy {number}")).dim()
                ));
                output.push_str(&self.highlight_code(content, *highlight));
                output.push_str(&self.render_feedback_controls(
                    *number,
                    *thumbs_up_active,
                    *thumbs_down_active,
                ));
                output
            }
        }
    }

    /// Render the thumbs-up / thumbs-down controls of a code block.
    pub fn render_feedback_controls(&self, number: usize, up_active: bool, down_active: bool) -> String {
        let up = format!("\u{1f44d} /up {number}");
        let down = format!("\u{1f44e} /down {number}");
        let up = if up_active {
            style(format!("[{up}]")).green().bold()
        } else {
            style(format!(" {up} ")).dim()
        };
        let down = if down_active {
            style(format!("[{down}]")).red().bold()
        } else {
            style(format!(" {down} ")).dim()
        };
        format!("  {up}  {down}\n")
    }

    /// Render a transient notice.
    pub fn render_notice(&self, notice: &Notice) -> String {
        match notice.level {
            NoticeLevel::Info => format!("  {} {}", style("*").cyan().bold(), notice.text),
            NoticeLevel::Error => format!("  {} {}", style("!").red().bold(), style(&notice.text).red()),
        }
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set.themes.get(&self.theme_name)
    }

    /// Highlight a code block using syntect.
    ///
    /// `None` (or a language syntect does not know) uses the plain-text syntax.
    fn highlight_code(&self, code: &str, highlight: Option<Language>) -> String {
        let syntax = highlight
            .and_then(|lang| self.syntax_set.find_syntax_by_extension(lang.extension()))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut output = String::new();
        let Some(theme) = self.theme() else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };

        let mut h = HighlightLines::new(syntax, theme);
        for line in LinesWithEndings::from(code) {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!(
                "  {}\x1b[0m\n",
                escaped.trim_end_matches(['\n', '\r'])
            ));
        }

        output
    }
}

/// `#N HH:MM`, dimmed.
fn block_header(number: usize, time: &str) -> String {
    style(format!("#{number} {time}")).dim().to_string()
}

/// Keep later lines of a multi-line message aligned under the first.
fn indent_continuation(text: &str) -> String {
    text.trim_end().replace('\n', "\n    ")
}
