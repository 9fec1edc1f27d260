//! Core types shared by the client, the tool and the transports.

pub mod error;

pub use error::ApodError;
