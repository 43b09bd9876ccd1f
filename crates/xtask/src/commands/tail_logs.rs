//! Tail client logs command
//!
//! Monitors the terminal client's log file in real-time, similar to `tail -f`.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dirs;

/// Monitor client logs in real-time
#[derive(Parser, Debug)]
pub struct TailLogs {
    /// Log directory (defaults to ADVENTURE_LOG_DIR or the platform cache dir)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Number of lines to show from history before tailing
    #[arg(short = 'n', long, default_value = "10")]
    pub lines: usize,

    /// Poll interval in milliseconds
    #[arg(long, default_value = "100")]
    pub poll_interval: u64,
}

impl TailLogs {
    pub fn execute(self) -> Result<()> {
        let log_dir = self.dir.clone().unwrap_or_else(dirs::log_dir);
        let log_path = dirs::log_file(&log_dir);

        if !log_path.exists() {
            eprintln!("{}", style("✗ Log file not found").red().bold());
            eprintln!("  Path: {}", style(log_path.display()).dim());
            eprintln!();
            eprintln!("  Run the client first to generate logs:");
            eprintln!("    {}", style("cargo run -p adventure-cli").cyan());
            anyhow::bail!("Log file does not exist");
        }

        println!("{}", style("📝 Monitoring adventure logs").green().bold());
        println!("  Log file: {}", style(log_path.display()).dim());
        println!();

        self.tail_file(&log_path)
    }

    /// Print the last N lines, then follow new content
    fn tail_file(&self, path: &Path) -> Result<()> {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        for line in last_lines(&mut file, self.lines)? {
            println!("{}", line);
        }

        let mut reader = BufReader::new(file);
        let poll_interval = Duration::from_millis(self.poll_interval);

        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => std::thread::sleep(poll_interval),
                Ok(_) => print!("{}", line),
                Err(e) => {
                    eprintln!("{}", style(format!("Error reading log file: {}", e)).red());
                    anyhow::bail!("Failed to read log file");
                }
            }
        }
    }
}

/// The last `n` lines of `file`, leaving the cursor at the end.
fn last_lines(file: &mut File, n: usize) -> Result<Vec<String>> {
    file.seek(SeekFrom::Start(0))?;

    let lines: Vec<String> = BufReader::new(&mut *file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .context("Failed to read lines from log file")?;

    let start = lines.len().saturating_sub(n);
    Ok(lines[start..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn keeps_only_the_tail() {
        let mut file = tempfile::tempfile().expect("tempfile");
        writeln!(file, "one\ntwo\nthree").expect("write");

        assert_eq!(last_lines(&mut file, 2).expect("lines"), ["two", "three"]);
        assert_eq!(last_lines(&mut file, 10).expect("lines").len(), 3);
    }
}
