// Resume generation: tone selection and the submit pipeline.
// All backend calls go through backend_client; nothing here talks HTTP directly.

pub mod handlers;
pub mod pipeline;
pub mod tone;
