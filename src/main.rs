mod app;
mod audio;
mod config;
mod error;
mod library;
mod metadata;
mod mpris;
mod playlist;
mod runtime;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
