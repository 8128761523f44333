//! Rendering of a streamed assistant answer

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use raimon_application::TurnObserver;
use raimon_domain::Model;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

/// Prints the answer as it streams in, with a spinner until the first fragment
pub struct StreamPrinter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl StreamPrinter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for StreamPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnObserver for StreamPrinter {
    fn on_stream_start(&self, model: &Model) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(model.to_string());
        pb.set_message("pensando...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_stream_chunk(&self, chunk: &str) {
        self.clear_spinner();
        print!("{}", chunk);
        let _ = io::stdout().flush();
    }

    fn on_stream_end(&self) {
        self.clear_spinner();
        println!();
    }
}

/// Text-only printer (no spinner), used with `--quiet`
pub struct PlainPrinter;

impl TurnObserver for PlainPrinter {
    fn on_stream_start(&self, model: &Model) {
        println!("{} {}", "->".cyan(), model.to_string().bold());
    }

    fn on_stream_chunk(&self, chunk: &str) {
        print!("{}", chunk);
        let _ = io::stdout().flush();
    }

    fn on_stream_end(&self) {
        println!();
    }
}
