//! Domain list input.
//!
//! Lists hold one domain per line. Blank lines and lines starting with `#`
//! are skipped. A path of `-` reads from stdin.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads a domain list from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub async fn read_domain_list(path: &Path) -> Result<Vec<String>> {
    let domains = if path.as_os_str() == "-" {
        info!("Reading domains from stdin");
        collect_domains(BufReader::new(tokio::io::stdin()))
            .await
            .context("Failed to read domains from stdin")?
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        collect_domains(BufReader::new(file))
            .await
            .with_context(|| format!("Failed to read input file {}", path.display()))?
    };

    info!("Total domains in list: {}", domains.len());
    Ok(domains)
}

async fn collect_domains<R: AsyncBufRead + Unpin>(reader: R) -> std::io::Result<Vec<String>> {
    let mut domains = Vec::new();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            domains.push(trimmed.to_string());
        }
    }
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_skips_blank_lines_and_comments() {
        let input: &[u8] = b"# production\nexample.com\n\n   www.example.com  \n#staging.example.com\n";
        let domains = collect_domains(input).await.unwrap();
        assert_eq!(domains, vec!["example.com", "www.example.com"]);
    }

    #[tokio::test]
    async fn test_handles_crlf_and_missing_final_newline() {
        let input: &[u8] = b"a.example\r\nb.example";
        let domains = collect_domains(input).await.unwrap();
        assert_eq!(domains, vec!["a.example", "b.example"]);
    }

    #[tokio::test]
    async fn test_reads_list_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "example.com").unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "example.org").unwrap();

        let domains = read_domain_list(file.path()).await.unwrap();
        assert_eq!(domains, vec!["example.com", "example.org"]);
    }

    #[tokio::test]
    async fn test_missing_file_names_the_path() {
        let err = read_domain_list(Path::new("/nonexistent/domains.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/domains.txt"));
    }
}
