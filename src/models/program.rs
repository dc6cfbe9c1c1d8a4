//! Academic program selector.

use std::fmt;

/// Which track's news to crawl. Decides the source list and output filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Program {
    /// Advanced Program in Computer Science
    #[default]
    Apcs,
    /// Standard IT program, keyword filtered
    Standard,
    /// High-quality (CLC) IT program, keyword filtered
    Clc,
}

impl Program {
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Apcs => "apcs",
            Program::Standard => "standard",
            Program::Clc => "clc",
        }
    }

    /// Report filename written for this program.
    pub fn output_filename(&self) -> &'static str {
        match self {
            Program::Apcs => "NEWS-APCS.md",
            Program::Standard => "NEWS-STANDARD.md",
            Program::Clc => "NEWS-CLC.md",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_filenames() {
        assert_eq!(Program::Apcs.output_filename(), "NEWS-APCS.md");
        assert_eq!(Program::Standard.output_filename(), "NEWS-STANDARD.md");
        assert_eq!(Program::Clc.output_filename(), "NEWS-CLC.md");
    }

    #[test]
    fn test_display_and_default() {
        assert_eq!(Program::Clc.to_string(), "clc");
        assert_eq!(Program::default(), Program::Apcs);
    }
}
