mod core;
pub use core::{
    Content, GeminiClient, GenerationConfig, Part, SystemInstruction, generate_content,
};
