use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Sink for streaming byte counts from the downloader. Purely
/// observational; implementations must not influence control flow.
pub trait ProgressObserver {
    fn on_start(&self, total: Option<u64>);
    fn on_chunk(&self, downloaded: u64);
}

/// Observer that renders nothing.
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_start(&self, _total: Option<u64>) {}
    fn on_chunk(&self, _downloaded: u64) {}
}

pub struct BatchProgress {
    multi: MultiProgress,
    overall: ProgressBar,
}

impl BatchProgress {
    pub fn new(total_files: usize) -> Self {
        let multi = MultiProgress::new();
        let overall = multi.add(ProgressBar::new(total_files as u64));
        overall.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        Self { multi, overall }
    }

    pub fn file_bar(&self, save_name: &str) -> FileProgress {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_message(save_name.to_string());
        FileProgress { bar: pb }
    }

    pub fn advance(&self) {
        self.overall.inc(1);
    }

    pub fn finish(&self) {
        self.overall.finish();
    }
}

pub struct FileProgress {
    bar: ProgressBar,
}

impl FileProgress {
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for FileProgress {
    fn on_start(&self, total: Option<u64>) {
        match total {
            Some(len) => {
                self.bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
                        .unwrap()
                        .progress_chars("#>-"),
                );
                self.bar.set_length(len);
            }
            // Without a Content-Length there is no bar or ETA, only a
            // running byte count and speed.
            None => {
                self.bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg} {bytes} ({bytes_per_sec})")
                        .unwrap(),
                );
            }
        }
        self.bar.set_position(0);
    }

    fn on_chunk(&self, downloaded: u64) {
        self.bar.set_position(downloaded);
    }
}
