use clap::Args;
use pixveil_core::Key;

use crate::CliResult;

/// Parses a key and prints its fields
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// The key to inspect, e.g. `S0T0E10N10H1V1P2CRG`
    #[arg(value_name = "key")]
    pub key: String,
}

impl KeyArgs {
    pub fn run(self) -> CliResult<()> {
        let key = Key::parse(&self.key)?;
        println!("{}", describe(&key));

        Ok(())
    }
}

fn describe(key: &Key) -> String {
    let channels: String = key.channels.iter().map(|c| c.letter()).collect();
    format!(
        "start:    ({}, {})\nend:      ({}, {}) (0 means image edge)\ngap:      ({}, {})\nchannels: {} per pixel, cycling {}\ncanonical: {}",
        key.start_x,
        key.start_y,
        key.end_x,
        key.end_y,
        key.gap_x,
        key.gap_y,
        key.channels_per_pixel,
        channels,
        key
    )
}
