//! Localized PDF reports for daily taxi-fleet activity.
//!
//! A request body is decoded into a [`payload::RequestPayload`], localized into a
//! [`model::ReportDocument`], rendered to PDF with `genpdf` and wrapped into a gateway-style
//! [`response::ReportResponse`]. [`handler::handle_request`] runs the whole pipeline.

pub mod builder;
pub mod dates;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod handler;
pub mod locale;
pub mod model;
pub mod payload;
pub mod render;
pub mod response;

pub use error::{DecodeError, RenderError, ReportError};
pub use handler::{generate_report, handle_request, handle_request_on};
pub use response::ReportResponse;
