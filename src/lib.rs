// CekViral: hoax verification for viral Indonesian content
//
// This is the library root. Each module corresponds to a stage of the
// verification pipeline or the infrastructure around it.

pub mod classify;
pub mod config;
pub mod db;
pub mod extract;
pub mod inference;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod status;

#[cfg(feature = "web")]
pub mod web;
