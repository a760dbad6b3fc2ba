// WASM entrypoint for Trunk.
//
// Native builds of this crate are no-ops; the real app is behind
// `--features web` and `wasm32`.

fn main() {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    bookquiz_web::start();
}
