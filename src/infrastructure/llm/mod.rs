mod openai_client;

pub use openai_client::{OpenAiClient, create_llm_client};
