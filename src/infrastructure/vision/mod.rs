mod openai_vision_describer;

pub use openai_vision_describer::OpenAiVisionDescriber;
