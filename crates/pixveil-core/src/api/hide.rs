use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::bpcs::BpcsEngine;
use crate::engine::Engine;
use crate::key::Key;
use crate::lsb::LsbEngine;
use crate::media::image_io::{self, ImageType, MIME_PNG};
use crate::SteganoError;

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<Vec<u8>>,
    file: Option<PathBuf>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    key: Option<String>,
    bpcs: bool,
    visual_debug: bool,
}

impl HideApi {
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.as_bytes().to_vec());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().as_bytes().to_vec());
        self
    }

    pub fn with_data(mut self, data: &[u8]) -> Self {
        self.message = Some(data.to_vec());
        self
    }

    /// hides the raw content of `data_file`, takes precedence over a message
    pub fn with_file<A: AsRef<Path>>(mut self, data_file: A) -> Self {
        self.file = Some(data_file.as_ref().to_path_buf());
        self
    }

    pub fn use_file(mut self, data_file: Option<PathBuf>) -> Self {
        self.file = data_file;
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// LSB traversal key, without a key the whole image's red channel is used
    pub fn using_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn use_key<S: AsRef<str>>(mut self, key: Option<S>) -> Self {
        self.key = key.map(|s| s.as_ref().to_string());
        self
    }

    /// switches from LSB to BPCS, a key is then ignored
    pub fn using_bpcs(self) -> Self {
        self.use_bpcs(true)
    }

    pub fn use_bpcs(mut self, bpcs: bool) -> Self {
        self.bpcs = bpcs;
        self
    }

    pub fn with_visual_debug(mut self, visual_debug: bool) -> Self {
        self.visual_debug = visual_debug;
        self
    }

    pub fn execute(self) -> Result<(), SteganoError> {
        let Some(image) = self.image.as_deref() else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(output) = self.output.as_deref() else {
            return Err(SteganoError::TargetNotSet);
        };
        let message = self.message()?;
        let engine = self.engine()?;

        let bytes = fs::read(image).map_err(|source| SteganoError::ReadError { source })?;
        let cover = image_io::decode_as(&bytes, ImageType::detect(&bytes, image)?)?;
        let stego = super::encode(&cover, &message, &engine)?;

        let output_mime = ImageType::from_path(output)
            .map(ImageType::mime)
            .unwrap_or(MIME_PNG);
        let encoded = image_io::encode(&stego, output_mime)?;
        fs::write(output, encoded).map_err(|source| SteganoError::WriteError { source })?;
        info!(
            "{} bytes hidden with {} in {}",
            message.len(),
            engine.name(),
            output.display()
        );

        Ok(())
    }

    fn message(&self) -> Result<Vec<u8>, SteganoError> {
        if let Some(file) = &self.file {
            return fs::read(file).map_err(|source| SteganoError::ReadError { source });
        }
        self.message.clone().ok_or(SteganoError::MissingMessage)
    }

    fn engine(&self) -> Result<Engine, SteganoError> {
        if self.bpcs {
            return Ok(BpcsEngine::default().into());
        }
        let key = match &self.key {
            Some(key) => Key::parse(key)?,
            None => Key::default(),
        };

        Ok(LsbEngine::new(key)
            .with_visual_debug(self.visual_debug)
            .into())
    }
}
