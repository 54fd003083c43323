use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use pixveil_core::SteganoError;

use crate::CliResult;

/// Unveils data hidden with `hide`
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image that contains secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub image: PathBuf,

    /// Unveiled data will be stored in that file instead of printed to stdout
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,

    /// The key used for hiding
    #[arg(short, long, value_name = "key", conflicts_with = "bpcs")]
    pub key: Option<String>,

    /// Data was hidden with bit-plane complexity segmentation
    #[arg(long)]
    pub bpcs: bool,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        let payload = pixveil_core::api::unveil::prepare()
            .with_secret_image(&self.image)
            .use_key(self.key)
            .use_bpcs(self.bpcs)
            .execute()?;

        match self.output_file {
            Some(file) => {
                std::fs::write(file, payload).map_err(|source| SteganoError::WriteError { source })
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&payload)?;
                stdout.flush()?;
                Ok(())
            }
        }
    }
}
