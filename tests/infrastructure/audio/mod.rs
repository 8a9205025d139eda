mod transcription_engine_factory_test;
