//! Extraction run options.

/// Options shared by single-file, directory and service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Gzip the encoded output
    pub gzip: bool,

    /// Report a status line for every file, not only failed ones
    pub verbose: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            gzip: true,
            verbose: false,
        }
    }
}

impl ExtractOptions {
    /// Create options with the defaults: gzip on, verbose off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable gzip output.
    pub fn with_gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    /// Enable or disable per-file status lines.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Extension given to outputs written into a directory.
    pub fn output_extension(&self) -> &'static str {
        if self.gzip {
            "input.json.gz"
        } else {
            "input.json"
        }
    }
}
