#![forbid(unsafe_code)]

/// `embed_migrations!` is not rerun when only the SQL files under
/// `./migrations` change, so the crate is marked dirty here instead.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
