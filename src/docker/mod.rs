// ABOUTME: Docker engine integration built on bollard

mod attach;
mod client;

pub use client::DockerRuntime;
