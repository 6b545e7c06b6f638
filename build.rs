use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds only compile the portable logic for unit tests
    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        return;
    }

    // Configure for ATmega128
    println!("cargo:rustc-link-arg=-mmcu=atmega128");

    if env::var("CARGO_FEATURE_SELF_TEST").is_ok() {
        println!("cargo:warning=Self tests run at every boot");
    }
}
