use std::env;

/// Forward an environment variable to the compiler, falling back to a default.
///
/// Set variables are echoed as build warnings so a flashed image's baked-in
/// network defaults are visible in the build log.
fn forward(name: &str, default: &str, echo: bool) {
    if let Ok(value) = env::var(name) {
        println!("cargo:rustc-env={}={}", name, value);
        if echo {
            println!("cargo:warning=Using {} from environment: {}", name, value);
        } else {
            println!("cargo:warning=Using {} from environment (hidden)", name);
        }
    } else {
        println!("cargo:rustc-env={}={}", name, default);
    }
    println!("cargo:rerun-if-env-changed={}", name);
}

fn main() {
    // Build-time network defaults, used until a settings service delivers
    // a stored configuration. Empty SSID leaves Wi-Fi disabled.
    forward("WIFI_SSID", "", true);
    forward("WIFI_PASSWORD", "", false);
    forward("WIFI_HOSTNAME", "pico-link", true);

    // DHCP enabled (default: true). Static addressing below applies when false.
    forward("WIFI_DHCP", "true", true);
    forward("WIFI_IP", "0.0.0.0", true);
    forward("WIFI_NETMASK", "255.255.255.0", true);
    forward("WIFI_GATEWAY", "0.0.0.0", true);
    forward("WIFI_DNS", "0.0.0.0", true);
    forward("WIFI_DNS2", "0.0.0.0", true);
}
