//! Shared test utilities.

use gendoc::{ClassDescriptor, MethodDescriptor};
use tempfile::TempDir;

/// Creates a temporary directory for database tests.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Builds the `Foo` class used across scenarios.
///
/// `getBar` is undocumented, `setBar` already carries a comment, `getName`
/// has a getter's shape but overrides a supertype method and `run` is not an
/// accessor.
pub fn foo_class() -> ClassDescriptor {
    ClassDescriptor::new("Foo", "com.example.Foo")
        .with_method(MethodDescriptor::new("getBar").returning("int"))
        .with_method(
            MethodDescriptor::new("setBar")
                .with_parameter("bar", "int")
                .documented("/** Existing comment. */"),
        )
        .with_method(
            MethodDescriptor::new("getName")
                .returning("String")
                .annotated("Override"),
        )
        .with_method(MethodDescriptor::new("run"))
}
