//! Welcome banner display for chat sessions.

use console::style;

/// Welcome banner shown when the conversation view starts.
pub fn welcome_banner(api_url: &str) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("  {} {}\n", style(">_").cyan().bold(), style("Thresh").cyan().bold()));
    out.push_str(&format!(
        "  {}\n\n",
        style("Describe the code you want to generate...").dim()
    ));
    out.push_str(&format!("  {}  {}\n\n", style("Service:").bold(), style(api_url).dim()));
    out.push_str(&format!(
        "  {}\n",
        style("Type /help for commands, Ctrl+D to exit").dim()
    ));
    out.push_str(&format!("  {}\n", style("---").dim()));
    out
}
