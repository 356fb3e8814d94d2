//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Generates Swift and Kotlin bindings for the brunch-find library, used by
//! the mobile apps to run the same recipe search as the web listing.
//!
//! ## Usage
//!
//! Generate Swift bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libbrunch_find.so --language swift --out-dir ./bindings
//! ```
//!
//! Generate Kotlin bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libbrunch_find.so --language kotlin --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
