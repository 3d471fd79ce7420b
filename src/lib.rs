pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod model;
pub mod output;
pub mod pager;
pub mod projector;
pub mod remote;
