use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::bpcs::BpcsEngine;
use crate::engine::Engine;
use crate::key::Key;
use crate::lsb::LsbEngine;
use crate::media::image_io::{self, ImageType};
use crate::SteganoError;

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_image: Option<PathBuf>,
    key: Option<String>,
    bpcs: bool,
}

impl UnveilApi {
    pub fn with_secret_image<A: AsRef<Path>>(mut self, secret_image: A) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    pub fn using_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn use_key<S: AsRef<str>>(mut self, key: Option<S>) -> Self {
        self.key = key.map(|s| s.as_ref().to_string());
        self
    }

    pub fn using_bpcs(self) -> Self {
        self.use_bpcs(true)
    }

    pub fn use_bpcs(mut self, bpcs: bool) -> Self {
        self.bpcs = bpcs;
        self
    }

    /// returns the hidden payload, the key must match the one used for hiding
    pub fn execute(self) -> Result<Vec<u8>, SteganoError> {
        let Some(secret_image) = self.secret_image.as_deref() else {
            return Err(SteganoError::CarrierNotSet);
        };
        let engine: Engine = if self.bpcs {
            BpcsEngine::default().into()
        } else {
            let key = match &self.key {
                Some(key) => Key::parse(key)?,
                None => Key::default(),
            };
            LsbEngine::new(key).into()
        };

        let bytes = fs::read(secret_image).map_err(|source| SteganoError::ReadError { source })?;
        let stego = image_io::decode_as(&bytes, ImageType::detect(&bytes, secret_image)?)?;
        let payload = super::decode(&stego, &engine)?;
        info!(
            "{} bytes unveiled with {} from {}",
            payload.len(),
            engine.name(),
            secret_image.display()
        );

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{prepare_noise_image, write_png};
    use tempfile::tempdir;

    #[test]
    fn should_unveil_what_was_hidden() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = write_png(temp_dir.path(), "carrier.png", &prepare_noise_image(48, 48));
        let secret = temp_dir.path().join("secret.png");

        crate::api::hide::prepare()
            .with_message("Hello, World!")
            .with_image(&carrier)
            .using_key("S3T2P2CBR")
            .with_output(&secret)
            .execute()
            .expect("Failed to hide message in image");

        let payload = prepare()
            .with_secret_image(&secret)
            .using_key("S3T2P2CBR")
            .execute()
            .expect("Failed to unveil message from image");

        assert_eq!(payload, b"Hello, World!");
    }

    #[test]
    fn should_unveil_a_file_hidden_with_bpcs() {
        let temp_dir = tempdir().unwrap();
        let carrier = write_png(temp_dir.path(), "carrier.png", &prepare_noise_image(64, 64));
        let data_file = temp_dir.path().join("data.bin");
        fs::write(&data_file, [0u8, 1, 2, 254, 255]).unwrap();
        let secret = temp_dir.path().join("secret.bmp");

        crate::api::hide::prepare()
            .with_file(&data_file)
            .with_image(&carrier)
            .using_bpcs()
            .with_output(&secret)
            .execute()
            .unwrap();

        let payload = prepare()
            .with_secret_image(&secret)
            .using_bpcs()
            .execute()
            .unwrap();

        assert_eq!(payload, [0u8, 1, 2, 254, 255]);
    }

    #[test]
    fn should_unveil_from_an_output_named_like_a_jpeg() {
        let temp_dir = tempdir().unwrap();
        let carrier = write_png(temp_dir.path(), "carrier.png", &prepare_noise_image(32, 32));

        for name in ["secret.jpg", "secret.jpeg", "secret.out"] {
            let secret = temp_dir.path().join(name);
            crate::api::hide::prepare()
                .with_message("Hi")
                .with_image(&carrier)
                .with_output(&secret)
                .execute()
                .expect("Failed to hide message in image");

            let payload = prepare()
                .with_secret_image(&secret)
                .execute()
                .expect("Failed to unveil message from image");

            assert_eq!(payload, b"Hi", "roundtrip through {name}");
        }
    }

    #[test]
    fn should_require_a_secret_image() {
        assert!(matches!(
            prepare().execute(),
            Err(SteganoError::CarrierNotSet)
        ));
    }

    #[test]
    fn should_reject_unknown_file_types() {
        let temp_dir = tempdir().unwrap();
        let text = temp_dir.path().join("notes.txt");
        fs::write(&text, "no pixels here").unwrap();

        assert!(matches!(
            prepare().with_secret_image(&text).execute(),
            Err(SteganoError::UnsupportedFormat(_))
        ));
    }
}
