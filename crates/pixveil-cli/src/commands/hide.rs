use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Hides a message or a file in a PNG, JPEG or BMP image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Carrier image, used readonly
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub image: PathBuf,

    /// Final image will be stored as file, `.bmp` keeps BMP, anything else becomes PNG
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// File whose content will be hidden
    #[arg(
        short = 'd',
        long = "data",
        value_name = "data file",
        required_unless_present = "message",
        conflicts_with = "message"
    )]
    pub data_file: Option<PathBuf>,

    /// A text message that will be hidden
    #[arg(
        short,
        long,
        value_name = "text message",
        required_unless_present = "data_file"
    )]
    pub message: Option<String>,

    /// LSB traversal key, e.g. `S10T5H1V1P2CRG`
    #[arg(short, long, value_name = "key", conflicts_with = "bpcs")]
    pub key: Option<String>,

    /// Use bit-plane complexity segmentation instead of keyed LSB
    #[arg(long)]
    pub bpcs: bool,

    /// Paints the carrier pixels so the traversal becomes visible
    #[arg(long, conflicts_with = "bpcs")]
    pub visual_debug: bool,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        pixveil_core::api::hide::prepare()
            .with_image(&self.image)
            .with_output(&self.write_to_file)
            .use_message(self.message)
            .use_file(self.data_file)
            .use_key(self.key)
            .use_bpcs(self.bpcs)
            .with_visual_debug(self.visual_debug)
            .execute()
    }
}
