//! HTTP API: routing and request/response mapping over the record service.

pub mod app;
