use crate::option::{Opt, DEFAULT_DESCRIPTION_INDENT};

/// Free-text sections around the option list in `--help` output.
///
/// Empty sections are left out together with their trailing blank line.
#[derive(Debug, Clone)]
pub struct HelpSections {
    pub program_info: String,
    pub usage: String,
    pub preamble: String,
    pub conclusion: String,
    pub description_indent: usize,
}

impl Default for HelpSections {
    fn default() -> Self {
        HelpSections {
            program_info: String::new(),
            usage: String::new(),
            preamble: String::new(),
            conclusion: String::new(),
            description_indent: DEFAULT_DESCRIPTION_INDENT,
        }
    }
}

impl HelpSections {
    pub fn render(&self, options: &[Opt]) -> String {
        let mut out = String::new();
        if !self.program_info.is_empty() {
            out.push_str(&self.program_info);
            out.push('\n');
        }
        if !self.usage.is_empty() {
            out.push_str(&self.usage);
            out.push_str("\n\n");
        }
        if !self.preamble.is_empty() {
            out.push_str(&self.preamble);
            out.push_str("\n\n");
        }
        out.push_str(&self.render_options(options));
        out.push('\n');
        if !self.conclusion.is_empty() {
            out.push_str(&self.conclusion);
            out.push('\n');
        }
        out
    }

    fn render_options(&self, options: &[Opt]) -> String {
        let mut out = String::from("Options:\n");
        for opt in options {
            out.push_str(&opt.help_line(self.description_indent));
            out.push('\n');
        }
        out
    }
}
