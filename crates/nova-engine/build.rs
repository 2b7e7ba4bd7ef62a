// Emits `cfg(desktop)` for targets where winit can be pumped from a foreign
// thread (Windows, macOS, Linux/BSD with X11 or Wayland).
fn main() {
    println!("cargo::rustc-check-cfg=cfg(desktop)");

    let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    if arch != "wasm32" && !matches!(os.as_str(), "ios" | "android") {
        println!("cargo::rustc-cfg=desktop");
    }
}
