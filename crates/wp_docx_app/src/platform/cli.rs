use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::logging::LogDestination;

/// Convert the pages of a WordPress XML export whose URLs you list into one structured DOCX.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// WordPress XML export file.
    #[arg(long, short = 'e')]
    pub export: Option<PathBuf>,

    /// Output .docx path (defaults to wp-export-structured.docx).
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Page URL to include; repeat for several pages.
    #[arg(long = "url", short = 'u', value_name = "URL")]
    pub urls: Vec<String>,

    /// File with one URL per line, or `-` to read them from stdin.
    #[arg(long, value_name = "PATH")]
    pub urls_file: Option<PathBuf>,

    /// Heading placed at the top of the document.
    #[arg(long)]
    pub title: Option<String>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print the run result as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// The URL list as the newline-separated text the form expects.
    pub fn url_input(&self) -> Result<String> {
        let mut text = match &self.urls_file {
            Some(path) if path.as_os_str() == "-" => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("read URL list from stdin")?;
                buf
            }
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("read URL list {}", path.display()))?,
            None => String::new(),
        };
        for url in &self.urls {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(url);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn repeated_urls_are_joined_by_newlines() {
        let args = Args::parse_from([
            "wp_docx",
            "--export",
            "site.xml",
            "-u",
            "https://example.com/a",
            "--url",
            "https://example.com/b",
        ]);
        assert_eq!(
            args.url_input().unwrap(),
            "https://example.com/a\nhttps://example.com/b"
        );
    }

    #[test]
    fn urls_file_and_flags_are_combined() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "https://example.com/x").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = Args::parse_from([
            "wp_docx",
            "--urls-file",
            path.as_str(),
            "-u",
            "https://example.com/y",
        ]);
        assert_eq!(
            args.url_input().unwrap(),
            "https://example.com/x\nhttps://example.com/y"
        );
    }

    #[test]
    fn missing_urls_file_is_an_error() {
        let args = Args::parse_from(["wp_docx", "--urls-file", "/definitely/not/here.txt"]);
        assert!(args.url_input().is_err());
    }

    #[test]
    fn export_is_optional_at_parse_time() {
        let args = Args::parse_from(["wp_docx"]);
        assert!(args.export.is_none());
        assert!(args.urls.is_empty());
        assert!(!args.json);
    }
}
