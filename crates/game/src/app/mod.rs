mod audio;
mod bootstrap;
mod screens;
mod world;

pub(crate) use bootstrap::{build_app, AppWiring};
