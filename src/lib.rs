pub const NOTEBOOK_EXTENSION: &str = "ipynb";
pub const DEFAULT_NOTEBOOK_DIR: &str = "notebooks";
pub const DEFAULT_OUTPUT_FILE: &str = "codigo_extraido.txt";

pub mod cli;
pub mod models;
pub mod parser;
pub mod walker;
pub mod writer;

pub use parser::{NotebookError, extract_code, parse_notebook, try_extract_code};
pub use walker::{WalkConfig, WalkError, WalkSummary, process_folder, run};

#[cfg(test)]
pub(crate) mod test_logs {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` with a subscriber that records every event as plain text.
    pub(crate) fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let out = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        (out, logs)
    }

    pub(crate) fn error_lines(logs: &str) -> Vec<&str> {
        logs.lines()
            .filter(|line| line.trim_start().starts_with("ERROR"))
            .collect()
    }
}
