#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod content;
mod elements;
mod error;
mod input;
mod mapper;
mod presets;
mod runtime;
mod sampler;
mod scheduler;
mod spring;
mod telemetry;
mod timeline;
mod transform;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
