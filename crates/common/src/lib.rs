//! Shared building blocks for the student records workspace:
//! wire envelopes returned by the HTTP layer and tracing setup.

pub mod types;

pub mod utils {
    pub mod logging;
}
