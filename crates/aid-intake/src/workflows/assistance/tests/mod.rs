mod catalog;
mod common;
mod service;
mod validation;
