// src/report/writer.rs
// =============================================================================
// Writes the end-of-run report as plain text files, one entry per line.
//
// Files (all opened in append mode, so repeated runs accumulate):
//   traps.txt       every rejected link and why
//   removed.txt     near-duplicates with their duplication score
//   subdomains.txt  host : number of known URLs
//   stats.txt       most-linking page, longest page, top words
//
// The accepted-URL log (downloaded.txt) is written while crawling, see
// `crawl::Crawler::run`.
// =============================================================================

use super::stats::RunReport;
use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const ACCEPTED_LOG: &str = "downloaded.txt";
pub const TRAPS_FILE: &str = "traps.txt";
pub const REMOVED_FILE: &str = "removed.txt";
pub const SUBDOMAINS_FILE: &str = "subdomains.txt";
pub const STATS_FILE: &str = "stats.txt";

/// Open `name` inside `dir` for appending, creating both if needed
pub fn open_append(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    std::fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(name))?;
    Ok(BufWriter::new(file))
}

pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write every report file
    pub fn write(&self, report: &RunReport) -> Result<()> {
        self.write_traps(report)?;
        self.write_removed(report)?;
        self.write_subdomains(report)?;
        self.write_stats(report)?;
        info!("Wrote run report to {:?}", self.dir);
        Ok(())
    }

    fn write_traps(&self, report: &RunReport) -> Result<()> {
        let mut out = open_append(&self.dir, TRAPS_FILE)?;
        for trap in &report.traps {
            writeln!(out, "{}\t{}", trap.url, trap.reason)?;
        }
        out.flush()?;
        Ok(())
    }

    fn write_removed(&self, report: &RunReport) -> Result<()> {
        let mut out = open_append(&self.dir, REMOVED_FILE)?;
        for (url, similarity) in report.removed() {
            writeln!(out, "{} --Duplication score: {:.3}", url, similarity)?;
        }
        out.flush()?;
        Ok(())
    }

    fn write_subdomains(&self, report: &RunReport) -> Result<()> {
        let mut out = open_append(&self.dir, SUBDOMAINS_FILE)?;
        writeln!(out, "subdomain : count of different urls")?;
        for (host, count) in &report.subdomains {
            writeln!(out, "{} : {}", host, count)?;
        }
        out.flush()?;
        Ok(())
    }

    fn write_stats(&self, report: &RunReport) -> Result<()> {
        let mut out = open_append(&self.dir, STATS_FILE)?;

        match &report.most_outlinks {
            Some(page) => writeln!(out, "most out-links: {} count: {}", page.url, page.count)?,
            None => writeln!(out, "most out-links: none")?,
        }
        match &report.longest_page {
            Some(page) => writeln!(out, "longest page: {} count: {}", page.url, page.count)?,
            None => writeln!(out, "longest page: none")?,
        }

        writeln!(out, "{} most common words", report.top_words.len())?;
        for (rank, entry) in report.top_words.iter().enumerate() {
            writeln!(out, "{}. {} : {}", rank + 1, entry.word, entry.count)?;
        }
        out.flush()?;
        Ok(())
    }
}
