#![warn(clippy::pedantic)]

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod rest;
