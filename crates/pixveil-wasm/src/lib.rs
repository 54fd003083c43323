use pixveil_core::api::{self, EncodeOptions};
use pixveil_core::Result;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// outcome of an encode or decode call, `message` holds the error text when `ok` is false
#[wasm_bindgen]
#[derive(Debug)]
pub struct Response {
    ok: bool,
    data: Vec<u8>,
    message: String,
}

#[wasm_bindgen]
impl Response {
    #[wasm_bindgen(getter)]
    pub fn ok(&self) -> bool {
        self.ok
    }

    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<Result<Vec<u8>>> for Response {
    fn from(result: Result<Vec<u8>>) -> Self {
        match result {
            Ok(data) => Self {
                ok: true,
                data,
                message: String::new(),
            },
            Err(e) => Self {
                ok: false,
                data: Vec::new(),
                message: e.to_string(),
            },
        }
    }
}

/// a parsed key in its canonical string form
#[wasm_bindgen]
#[derive(Debug)]
pub struct KeyResponse {
    ok: bool,
    key: String,
    message: String,
}

#[wasm_bindgen]
impl KeyResponse {
    #[wasm_bindgen(getter)]
    pub fn ok(&self) -> bool {
        self.ok
    }

    #[wasm_bindgen(getter)]
    pub fn key(&self) -> String {
        self.key.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Host side defaults. Every session starts with visual debugging off.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct Session {
    debug_mode: bool,
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = setDebugMode)]
    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.debug_mode = debug_mode;
    }

    #[wasm_bindgen(getter, js_name = debugMode)]
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[wasm_bindgen(js_name = encodeLSB)]
    pub fn encode_lsb(&self, image: &[u8], image_type: &str, message: &[u8], key: &str) -> Response {
        let options = EncodeOptions::default().with_visual_debug(self.debug_mode);
        api::encode_lsb(image, image_type, message, key, &options).into()
    }
}

#[wasm_bindgen(js_name = encodeLSB)]
pub fn encode_lsb(image: &[u8], image_type: &str, message: &[u8], key: &str) -> Response {
    api::encode_lsb(image, image_type, message, key, &EncodeOptions::default()).into()
}

#[wasm_bindgen(js_name = decodeLSB)]
pub fn decode_lsb(image: &[u8], image_type: &str, key: &str) -> Response {
    api::decode_lsb(image, image_type, key).into()
}

#[wasm_bindgen(js_name = encodeBPCS)]
pub fn encode_bpcs(image: &[u8], image_type: &str, message: &[u8]) -> Response {
    api::encode_bpcs(image, image_type, message).into()
}

#[wasm_bindgen(js_name = decodeBPCS)]
pub fn decode_bpcs(image: &[u8], image_type: &str) -> Response {
    api::decode_bpcs(image, image_type).into()
}

#[wasm_bindgen(js_name = parseKey)]
pub fn parse_key(key: &str) -> KeyResponse {
    match api::parse_key(key) {
        Ok(key) => KeyResponse {
            ok: true,
            key: key.to_string(),
            message: String::new(),
        },
        Err(e) => KeyResponse {
            ok: false,
            key: String::new(),
            message: e.to_string(),
        },
    }
}
