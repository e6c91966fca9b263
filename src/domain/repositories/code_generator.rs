//! Short code generator trait.

/// Source of candidate short codes.
///
/// Generators carry no uniqueness guarantee; callers probe the store and retry.
///
/// # Implementations
///
/// - [`crate::utils::code_generator::RandomCodeGenerator`] - random 3-character codes
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate short code. Never fails.
    fn generate(&self) -> String;
}
