fn main() {
    // exposes package name/version/etc. to `metadata.rs` through OUT_DIR/built.rs
    built::write_built_file().expect("Failed to acquire build-time information");
}
