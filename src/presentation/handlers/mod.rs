mod analysis;
mod deviations;
mod error_response;
mod health;
mod media;

pub use analysis::get_analysis_handler;
pub use deviations::{
    CreateDeviationRequest, create_deviation_handler, delete_deviation_handler,
    get_deviation_handler, list_deviations_handler,
};
pub use error_response::{ErrorResponse, error_response};
pub use health::{health_handler, ping_handler};
pub use media::{get_photo_handler, get_recording_handler, transcribe_recording_handler};
