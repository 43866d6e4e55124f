//! Rebuilds the crate whenever a migration file changes, since
//! `embed_migrations!` reads `migrations/` at compile time.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
